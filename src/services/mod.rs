pub mod generate;
pub mod moderate;
pub mod prompts;
pub mod providers;
pub mod recommend;
