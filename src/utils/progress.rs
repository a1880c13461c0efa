//! Per-document progress reporting for long corpus passes
//!
//! Without the `progress` feature the bar compiles to nothing.

#[cfg(feature = "progress")]
const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} docs ({percent}%) {msg}";

#[cfg(feature = "progress")]
pub use indicatif::ProgressBar;

/// Bar counting `total` documents, labelled with `message`
#[cfg(feature = "progress")]
pub fn document_bar(total: u64, message: &'static str) -> ProgressBar {
    use indicatif::ProgressStyle;

    let style = ProgressStyle::with_template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ");
    ProgressBar::new(total).with_style(style).with_message(message)
}

#[cfg(not(feature = "progress"))]
pub use self::silent::ProgressBar;

#[cfg(not(feature = "progress"))]
pub fn document_bar(_total: u64, _message: &'static str) -> ProgressBar {
    ProgressBar
}

#[cfg(not(feature = "progress"))]
mod silent {
    /// Accepts progress updates and discards them
    #[derive(Clone)]
    pub struct ProgressBar;

    impl ProgressBar {
        pub fn inc(&self, _delta: u64) {}
        pub fn finish_and_clear(&self) {}
    }
}
