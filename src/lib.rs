//! # vibe-search
//!
//! A Rust web application that ranks real-estate listings against free-text
//! queries by combining vector-embedding cosine similarity with a lexical
//! keyword fallback, and enriches both queries and listings with
//! hand-authored "vibe" concept expansions (e.g. "wizard" → tower, stone,
//! library, ancient).
//!
//! ## Architecture
//!
//! ```text
//!                       ┌──────────────┐
//!                       │  User Query  │
//!                       └──────┬───────┘
//!                              │
//!                              ▼
//!                  ┌───────────────────────┐
//!                  │   Query Expansion     │
//!                  │ (concept dictionary,  │
//!                  │  first match wins)    │
//!                  └───────────┬───────────┘
//!                              │ expanded query
//!                              ▼
//!                  ┌───────────────────────┐      provider down / no vectors
//!                  │  Embedding Provider   │──────────────┐
//!                  │  (cache, then HTTP)   │              │
//!                  └───────────┬───────────┘              ▼
//!                              │ query vector   ┌───────────────────────┐
//!                              ▼                │  Lexical Fallback     │
//!                  ┌───────────────────────┐    │  term overlap +       │
//!                  │  Similarity Ranker    │    │  price/size bonuses   │
//!                  │  cosine, top-K        │    └───────────┬───────────┘
//!                  └───────────┬───────────┘                │
//!                              │                            │
//!                              └────────────┬───────────────┘
//!                                           ▼
//!                               ┌───────────────────────┐
//!                               │    Ranked Results     │
//!                               └───────────────────────┘
//! ```
//!
//! Listings themselves go through a one-time offline enrichment pass that
//! rewrites each raw MLS row into a vibe-rich description (the embedding
//! surface) before any vectors are generated.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, data dir, embedding provider, and scorer thresholds
//! - [`models`] - Shared data types: `Listing`, `SearchResult`, corpus/request/response types
//! - [`concepts`] - The static concept dictionary: ordered token → vibe-word mappings
//! - [`enrich`] - Offline description enrichment (vibes, creative scenarios, metaphors, tags)
//! - [`search`] - Query expansion, cosine similarity ranking, and lexical fallback scoring
//! - [`embed`] - Embedding provider client (Gemini or OpenAI-compatible) plus bounded query cache
//! - [`corpus`] - Loading and persisting the enriched-listings artifact
//! - [`api`] - Axum HTTP handlers for search, browsing, health, and corpus embedding
//! - [`state`] - Shared application state holding the corpus, dictionary, cache, and config

pub mod api;
pub mod concepts;
pub mod config;
pub mod corpus;
pub mod embed;
pub mod enrich;
pub mod error;
pub mod models;
pub mod search;
pub mod state;
