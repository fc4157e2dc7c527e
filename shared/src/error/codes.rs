//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: User errors
//! - 4xxx: Order errors
//! - 5xxx: File / spreadsheet errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the frontend can switch
/// on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// No bearer token on the request
    TokenMissing = 1005,
    /// New password does not satisfy the password policy
    PasswordTooWeak = 1006,
    /// New password equals the current one
    PasswordUnchanged = 1007,
    /// Current password did not verify
    CurrentPasswordIncorrect = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Sales user acting on an order created by someone else
    OrderNotOwned = 2002,

    // ==================== 3xxx: User ====================
    /// User not found
    UserNotFound = 3001,
    /// Email is already registered
    EmailAlreadyExists = 3002,
    /// Role outside the fixed enumeration
    InvalidRole = 3003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order id is not a valid record id
    InvalidOrderId = 4002,
    /// Order has no product lines
    OrderEmpty = 4003,
    /// Product line is missing fields or has invalid values
    InvalidProductLine = 4004,
    /// Bulk import row failed validation
    BulkImportFailed = 4005,
    /// Bulk import file contains no rows
    EmptyImport = 4006,

    // ==================== 5xxx: File ====================
    /// No file in the multipart upload
    NoFileProvided = 5001,
    /// Upload is not a readable spreadsheet
    UnsupportedFileFormat = 5002,
    /// Upload exceeds the configured limit
    FileTooLarge = 5003,
    /// Spreadsheet could not be read or written
    SpreadsheetError = 5004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::TokenMissing => "No token provided",
            ErrorCode::PasswordTooWeak => {
                "New password must be at least 8 characters long and include uppercase, lowercase, number, and special character"
            }
            ErrorCode::PasswordUnchanged => {
                "New password must be different from current password"
            }
            ErrorCode::CurrentPasswordIncorrect => "Current password is incorrect",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::OrderNotOwned => "Unauthorized to delete this order",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailAlreadyExists => "Email already exists",
            ErrorCode::InvalidRole => "Invalid role",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidOrderId => "Invalid order ID",
            ErrorCode::OrderEmpty => "Order must contain at least one product",
            ErrorCode::InvalidProductLine => "Invalid product data",
            ErrorCode::BulkImportFailed => "Bulk import failed",
            ErrorCode::EmptyImport => "No valid orders found in the file",

            // File
            ErrorCode::NoFileProvided => "No file uploaded",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::SpreadsheetError => "Spreadsheet processing failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::TokenMissing),
            1006 => Ok(ErrorCode::PasswordTooWeak),
            1007 => Ok(ErrorCode::PasswordUnchanged),
            1008 => Ok(ErrorCode::CurrentPasswordIncorrect),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::OrderNotOwned),

            // User
            3001 => Ok(ErrorCode::UserNotFound),
            3002 => Ok(ErrorCode::EmailAlreadyExists),
            3003 => Ok(ErrorCode::InvalidRole),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::InvalidOrderId),
            4003 => Ok(ErrorCode::OrderEmpty),
            4004 => Ok(ErrorCode::InvalidProductLine),
            4005 => Ok(ErrorCode::BulkImportFailed),
            4006 => Ok(ErrorCode::EmptyImport),

            // File
            5001 => Ok(ErrorCode::NoFileProvided),
            5002 => Ok(ErrorCode::UnsupportedFileFormat),
            5003 => Ok(ErrorCode::FileTooLarge),
            5004 => Ok(ErrorCode::SpreadsheetError),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::TokenMissing.code(), 1005);
        assert_eq!(ErrorCode::OrderNotOwned.code(), 2002);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_round_trips_every_code() {
        let all = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenMissing,
            ErrorCode::CurrentPasswordIncorrect,
            ErrorCode::OrderNotOwned,
            ErrorCode::EmailAlreadyExists,
            ErrorCode::InvalidOrderId,
            ErrorCode::EmptyImport,
            ErrorCode::SpreadsheetError,
            ErrorCode::ConfigError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
        let code: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(code, ErrorCode::InvalidCredentials);
    }

    #[test]
    fn test_login_failures_share_one_message() {
        assert_eq!(ErrorCode::InvalidCredentials.message(), "Invalid credentials");
    }
}
