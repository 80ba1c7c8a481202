//! Process exit code registry
//!
//! Exit codes are part of the shell contract: launch scripts and supervisors
//! branch on them, so the numeric values must not change.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success                                         |
//! | 1    | General error (e.g. unknown key on `get`)       |
//! | 2    | CLI usage error (emitted by clap itself)        |
//! | 100  | Config file does not exist / no tier resolved   |
//! | 101  | Config file unreadable or malformed             |
//! | 102  | `logger` section missing or not an object       |
//! | 103  | `http` section missing or not an object         |
//! | 104  | `static` section missing or not an object       |

/// Success.
pub const EXIT_SUCCESS: u8 = 0;

/// General error, unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// A required config file is missing, or no tier had both documents.
pub const EXIT_CONFIG_FILE_NOT_EXIST: u8 = 100;

/// A config file exists but could not be read or parsed.
pub const EXIT_CONFIG_FILE: u8 = 101;

pub const EXIT_CONFIG_LOGGER: u8 = 102;

pub const EXIT_CONFIG_HTTP: u8 = 103;

pub const EXIT_CONFIG_STATIC: u8 = 104;
