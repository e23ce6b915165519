use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Server error code for a unique index violation
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Whether `err` is a unique index violation (E11000)
///
/// Covers single-document writes (`insert_one`, `update_one`) and command
/// errors such as `findAndModify`.
pub fn is_duplicate_key_error(err: &Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// Name of the unique index that rejected the write, when the server reports it
pub fn duplicate_key_index(err: &Error) -> Option<String> {
    let message = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            write_error.message.as_str()
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            command_error.message.as_str()
        }
        _ => return None,
    };

    index_from_message(message).map(str::to_string)
}

/// Extract `<name>` from "E11000 duplicate key error collection: db.c index: <name> dup key: {..}"
fn index_from_message(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("index: ")?;
    rest.split_whitespace().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_from_message() {
        let message = "E11000 duplicate key error collection: shardDB.users \
                       index: idx_users_email_unique dup key: { email: \"a@b.c\" }";
        assert_eq!(index_from_message(message), Some("idx_users_email_unique"));
    }

    #[test]
    fn test_index_from_message_without_index() {
        assert_eq!(index_from_message("E11000 duplicate key error"), None);
    }
}
