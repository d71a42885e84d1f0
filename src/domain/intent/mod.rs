//! Intent domain module

mod catalog;
mod command;
mod grammar;

pub use catalog::{Bank, Catalog, Contact};
pub use command::{Command, ScreenTarget, ALL_SCREENS};
pub use grammar::{
    contains_back_phrase, extract_amount, extract_digits, extract_phone, match_catalog,
    IntentGrammar, PhoneValue, BACK_PHRASES, PHONE_DIGITS,
};
