pub mod codec_tests;
pub mod fetcher_tests;
