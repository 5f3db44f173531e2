mod common;
mod parser;
mod routing;
mod scoring;
