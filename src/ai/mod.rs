mod client;
mod inference;
mod verdict;

pub use client::{ClassifyError, CompletionClient, EmailClassifier};

#[cfg(test)]
pub use client::MockEmailClassifier;
