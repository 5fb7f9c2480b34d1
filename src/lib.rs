/*!
# Proposal Sheet Export

A dynamic spreadsheet-export service for an insurance-benefits brokerage,
built in Rust.

## Overview

Vendors create proposals (insurance contract offers), clients fill in
personal and dependent data and upload documents, and internal staff review
and track commissions. This crate implements the export side of that system:
it turns a heterogeneous batch of proposal records into one rectangular
sheet whose width adapts to the widest proposal in the batch.

## Architecture

The export is a one-directional, stateless pipeline:

### Structure Analyzer
- Scans the whole batch once and computes the maximum number of
  title-holder, dependent and attachment slots
- Floor values (3 title-holders, 5 dependents, 3+3 attachments) guarantee a
  minimum schema width even for an empty batch

### Header Generator
- Emits the fixed base block (identity, contract, workflow, commission,
  attachment summary), then indexed group columns
  (`TITULAR1_NOME` .. `DEPENDENTEn_PARENTESCO`), then the trailing block

### Row Formatter
- Produces exactly one row per proposal, positionally aligned to the
  headers, padding missing slots with empty strings
- Applies the commission business rules (split sale, meeting commission,
  supervisor constants) and renders booleans as Sim/Não

### Sheet Assembler
- Orchestrates analyzer, headers and formatter into a `SheetData` plus a
  plain 2-D matrix for bulk spreadsheet "values" APIs

## Key Features

- Column-count determinism: every row has exactly `total_columns` cells
- Monotonic schema growth: batch-wide maxima, never per-row widths
- Default-value fallbacks everywhere; malformed input cannot fail an export
- CSV and XLSX download, gzip+bincode store snapshots, JSON batch loading
- REST API over an in-memory proposal store (optional `web` feature)

## Modules

- **proposal**: Proposal/Person/Attachment data model and status enum
- **analyzer**: Structure Analyzer and the named export constants
- **headers**: Header Generator
- **formatter**: Row Formatter
- **sheet**: Sheet Assembler and the 2-D matrix companion
- **downloader**: Export functionality (CSV, XLSX)
- **loader**: JSON batch import
- **saving**: Proposal-store persistence with compression
- **app**: Routing and handlers (web feature)

## REST API Endpoints

- `GET /api/proposals` - List the stored proposals
- `POST /api/proposals` - Store a proposal (assigns id, validates ABM code)
- `GET /api/sheet` - Assembled sheet with headers, rows and maxima
- `GET /api/sheet/matrix` - Flat 2-D matrix, headers in row 0
- `GET /api/export/csv`, `GET /api/export/xlsx` - Downloadable exports
- `POST /api/save`, `POST /api/load` - Store snapshot persistence
*/

// Re-export all modules so they appear in the documentation
pub mod analyzer;
pub mod downloader;
pub mod formatter;
pub mod headers;
pub mod loader;
pub mod proposal;
pub mod saving;
pub mod sheet;

#[cfg(feature = "web")]
pub mod app;

/// Re-export everything from these modules to make it easier to use
pub use analyzer::*;
pub use downloader::*;
pub use formatter::*;
pub use headers::*;
pub use loader::*;
pub use proposal::*;
pub use saving::*;
pub use sheet::*;
