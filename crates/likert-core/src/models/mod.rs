pub mod answer;
pub mod factor;
pub mod interpretation;
pub mod question;
pub mod ruleset;
pub mod visibility;
