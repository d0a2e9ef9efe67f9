//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage error (also: toggling an unknown, account or hidden node)
pub const USAGE: i32 = 64;

/// Data format error (undecodable or malformed records)
pub const DATAERR: i32 = 65;

/// Cannot open input
pub const NOINPUT: i32 = 66;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
