//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Marionette Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[bridge]
# Flush automatically once this many operations are pending.
# 0 keeps operations buffered until an explicit flush.
# flush_threshold = 0     # 0-10000
# id_prefix = "$"

[logging]
# level = "info"          # trace, debug, info, warn, error
"##
    .to_string()
}
