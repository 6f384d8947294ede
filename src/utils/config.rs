//! Configuration and constants for the CLI.

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

// Symbol matching defaults.
// Go symbols look like "k8s.io/api/core/v1.(*Pod).Unmarshal", so splitting
// on '.' puts the family root first and the receiver second to last.
pub const DEFAULT_ENTRY_POINT: &str = "Unmarshal";
pub const DEFAULT_FAMILY_ROOT: &str = "k8s";
pub const DEFAULT_FAMILY_PATH: &str = "k8s.io";

/// Separator between symbol path components
pub const SYMBOL_SEPARATOR: char = '.';

/// Sample types of a Go heap profile, in slot order
pub const HEAP_SAMPLE_TYPES: &[&str] = &[
    "alloc_objects",
    "alloc_space",
    "inuse_objects",
    "inuse_space",
];

/// Leading bytes of a gzip stream
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
