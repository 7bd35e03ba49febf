//! Fixed user-facing message catalogue for the interactive session

/// Shown once at session start
pub fn welcome() -> String {
    format!(
        "Welcome to File Search Assistant v{}\nType 'exit' or 'quit' to end the session",
        crate::VERSION
    )
}

pub const FILE_FOUND: &str = "File found:";
pub const FILES_FOUND: &str = "Related files found:";
pub const NO_FILES: &str =
    "No files were found. Please try again with different keywords or check the file extension.";
pub const TYPE_OPEN: &str = "Type \"open\" to open this file";
pub const ENTER_NUMBER: &str = "Please enter the number of the file you want to open.";
pub const FILE_OPENED: &str = "✓ File opened successfully";
pub const FILE_ERROR: &str = "Error opening file:";
pub const NO_FILE_SELECTED: &str = "No file selected.";
pub const INVALID_NUMBER: &str = "Invalid number. Please try again.";
pub const ERROR_OCCURRED: &str = "Error occurred:";

pub const SEARCH_TIPS: &[&str] = &[
    "Make sure your spelling is correct.",
    "Try different or more general keywords.",
    "Try removing the file extension to broaden the search.",
    "Check if the file exists in the search directory.",
];
