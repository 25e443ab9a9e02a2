//! Log format constants.
//!
//! Byte/char constants for the tab-separated character-history log and the
//! bracketed annotation groups in its tree column.

/// Column separator of a sample row
pub(crate) const COLUMN_SEPARATOR: char = '\t';

/// First field of the header row written by the monitor ("Iter")
pub(crate) const HEADER_ITERATION: &str = "Iter";

/// Minimum number of columns: iteration, posterior, likelihood, prior, tree
pub(crate) const MIN_COLUMNS: usize = 5;

/// Column names used in error messages, by position
pub(crate) const COLUMN_NAMES: [&str; MIN_COLUMNS] =
    ["iteration", "posterior", "likelihood", "prior", "annotations"];

/// Opening bracket of an annotation group
pub(crate) const GROUP_OPEN: char = '[';

/// Closing bracket of an annotation group
pub(crate) const GROUP_CLOSE: char = ']';

/// Marker of extended annotations directly after the opening bracket "[&"
pub(crate) const ANNOTATION_MARKER: char = '&';

/// Separator of key-value tokens within a group
pub(crate) const TOKEN_SEPARATOR: char = ';';

/// Separator between key and value of a token
pub(crate) const KEY_VALUE_SEPARATOR: char = '=';

/// Braces enclosing the event list and each event record
pub(crate) const EVENT_BRACES: [char; 2] = ['{', '}'];

/// Separator of fields within the event list
pub(crate) const EVENT_FIELD_SEPARATOR: char = ',';

/// Number of fields per event record: time, age, state, index
pub(crate) const EVENT_FIELDS: usize = 4;

/// Length of the type prefix of each event field, e.g. "t:"
pub(crate) const EVENT_PREFIX_LEN: usize = 2;
