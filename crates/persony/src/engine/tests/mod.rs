mod common;
mod scoring;
mod selection;
