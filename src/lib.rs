/*! # `rootcellar`

The core of a structured root beer review site: one curator records tasting
sessions, visitors browse and compare the results.

## Purpose

This crate owns the data model and the logic with real invariants:

- entity schemas and validation that keep objective product facts,
  quantified sensory ratings, and subjective opinion strictly apart;
- the sensory aggregator, which turns a product's reviews into the averaged
  vector behind its radar chart;
- the catalog query engine (filter, sort, paginate);
- idempotent startup seeding of the flavor-note / color / serving-context
  vocabularies;
- audit stamping for every mutation.

HTTP routing, sessions, templates, and the storage engines are external
collaborators. The document store comes in through
[`store::DocumentStore`], the image bucket through [`images::ImageStore`],
the actor identity as an opaque string, and the clock through
[`audit::Clock`].
*/

pub mod aggregate;
pub mod audit;
pub mod catalog;
pub mod config;
pub mod error;
pub mod images;
pub mod models;
pub mod seed;
pub mod store;
