//! savesync Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `CatalogEntry`, `TargetItem`, `SyncRequest`, `SyncReport`
//! - **Use cases** - `ResolveItemsUseCase`, `SyncItemsUseCase`
//! - **Port definitions** - Traits for adapters: `ITransferClient`, `ILocalMirror`,
//!   `ICatalogStore`, `IDestinationResolver`, `IProgressSink`
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure matching and naming rules with no I/O.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
