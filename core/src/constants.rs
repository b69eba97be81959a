//! Fixed geometry and decoration of the header block.

/// Number of lines in a rendered header, borders included.
pub const HEADER_LINE_COUNT: usize = 11;

/// Offset of the `Created:` line from the first border line.
pub const CREATED_LINE_INDEX: usize = 7;

/// Total width used when neither the caller nor the language asks for another.
pub const DEFAULT_HEADER_WIDTH: usize = 80;

/// Total width for languages with a 79-column convention.
pub const NARROW_HEADER_WIDTH: usize = 79;

pub const MIN_HEADER_WIDTH: usize = 70;
pub const MAX_HEADER_WIDTH: usize = 160;

/// Floor for the space between the two delimiters.
pub const MIN_INNER_WIDTH: usize = 20;

/// `chrono` format string for header timestamps (`2024/03/01 09:05:00`).
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

// Right-hand decoration, one per content line.
pub const TITLE_SUFFIX: &str = ":::      ::::::::   ";
pub const FILE_SUFFIX: &str = ":+:      :+:    :+:   ";
pub const COLUMN_SUFFIX: &str = "+:+ +:+         +:+     ";
pub const BY_SUFFIX: &str = "+#+  +:+       +#+        ";
pub const SPACER_SUFFIX: &str = "+#+#+#+#+#+   +#+           ";
pub const CREATED_SUFFIX: &str = "#+#    #+#             ";
pub const UPDATED_SUFFIX: &str = "###   ########.fr       ";
