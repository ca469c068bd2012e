//! Common wikitext fixtures for tests.

// Subobjects with derived identifiers
pub const ANONYMOUS_SUBOBJECT: &str = "{{#subobject:|Has age=42}}";
pub const PLACEHOLDER_SUBOBJECT: &str = "{{#subobject:-|Has age=42}}";

// Subobject with an explicit identifier
pub const NAMED_SUBOBJECT: &str =
    "{{#subobject:employment|Has employer=ACME|Has salary=50000}}";

// Sort key resolution
pub const SORTBY_PRESENT: &str =
    "{{#subobject:|Has name=Ada|Has age=36|@sortby=Has name}}";
pub const SORTBY_ABSENT: &str = "{{#subobject:|Has age=36|@sortby=Has name}}";

// Malformed parameters never abort the function
pub const MALFORMED_SUBOBJECT: &str = "{{#subobject:|=42|stray|Has age=42}}";

// Surrounding prose stays untouched
pub const EMBEDDED_SUBOBJECT: &str =
    "Employment record: {{#subobject:|Has employer=ACME}} filed.";
