use crux_core::typegen::TypeGen;
use domain::ScrapeError;
use shared::{
    CaptionScrapingApp, ScrapingBody,
    capabilities::{http::HttpOutput, navigation::Screen},
};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed=../shared");

    let mut typegen = TypeGen::new();
    typegen.register_app::<CaptionScrapingApp>()?;
    typegen.register_type::<Screen>()?;
    typegen.register_type::<ScrapingBody>()?;
    typegen.register_type::<HttpOutput>()?;
    typegen.register_type::<ScrapeError>()?;

    let output_root = PathBuf::from("./generated");
    typegen.swift("SharedTypes", output_root.join("swift"))?;
    typegen.java("com.caption_scraper.shared", output_root.join("java"))?;

    Ok(())
}
