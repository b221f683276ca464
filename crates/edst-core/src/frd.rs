// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

use anyhow::Result;

use crate::route::Position;

/// Computes the fix-radial-distance of a position, e.g. `OAK090012`.
///
/// Implementations usually ask the flight-data server. The call blocks
/// the command that needs it; an error makes that command reject.
pub trait FrdResolver {
    fn resolve_frd(&self, artcc_id: &str, position: Position) -> Result<String>;
}

impl<F> FrdResolver for F
where
    F: Fn(&str, Position) -> Result<String>,
{
    fn resolve_frd(&self, artcc_id: &str, position: Position) -> Result<String> {
        self(artcc_id, position)
    }
}

/// Always answers with the same FRD. Useful offline and in tests.
#[derive(Debug, Clone)]
pub struct StaticFrdResolver(pub String);

impl FrdResolver for StaticFrdResolver {
    fn resolve_frd(&self, _artcc_id: &str, _position: Position) -> Result<String> {
        Ok(self.0.clone())
    }
}
