//! Foreign type bindings for the caption scraping core are generated by `build.rs`.
