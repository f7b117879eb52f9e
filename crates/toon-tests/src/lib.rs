//! Integration tests for the toonify crates.
//!
//! End-to-end checks that decoding, the cartoon filter and encoding fit
//! together: files in, files out.
