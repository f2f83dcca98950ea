// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Rack allocation properties (elevation shape, availability correctness,
//! placement round trips) and ordering properties (total order, slot order).

mod name_ordering;
mod rack_allocation;
