// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;

// Logs go to stderr so they never mix with board printouts or JSON answers.
// RUST_LOG overrides the given default, eg RUST_LOG=wordbot=debug.
pub fn init(default_spec: &str) -> error::Returns<flexi_logger::LoggerHandle> {
    Ok(flexi_logger::Logger::try_with_env_or_str(default_spec)?
        .format(flexi_logger::colored_default_format)
        .start()?)
}
