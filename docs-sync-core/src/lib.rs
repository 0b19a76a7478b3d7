#![doc = "docs-sync-core: core logic library for docs-sync."]

//! This crate contains the documentation pipeline: frontmatter parsing,
//! content rewriting, output planning, index generation, and the package
//! docs mirror. The CLI crate only wires configuration and logging around it.
//!
//! # Usage
//! Build the site pages with [`site::build_site`], mirror external package docs
//! with [`packages::sync_packages`].

pub mod config;
pub mod contract;
pub mod download;
pub mod frontmatter;
pub mod index;
pub mod output;
pub mod packages;
pub mod planner;
pub mod site;
pub mod transform;
