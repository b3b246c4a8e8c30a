//! Pruning and reduction knobs.

/// Which speculative techniques the search may use, with their margins.
///
/// The defaults enable everything; [`PruneParams::minimal`] turns the search
/// into plain alpha-beta over the static evaluation, which is still exact
/// with respect to full minimax and useful for validation and A/B runs.
#[derive(Clone, Copy, Debug)]
pub struct PruneParams {
    /// Probe and store transposition-table entries.
    pub use_tt: bool,
    /// Null-move pruning at non-PV nodes with non-pawn material.
    pub use_null_move: bool,
    /// Late-move reductions for quiet moves ordered far down the list.
    pub use_lmr: bool,
    /// Aspiration windows around the previous iteration's score.
    pub use_aspiration: bool,
    /// Razoring: drop near-horizon nodes whose eval trails alpha badly.
    pub use_razoring: bool,
    /// Reverse futility: stand on a near-horizon eval far above beta.
    pub use_rfp: bool,
    /// Capture resolution at the horizon instead of a raw static eval.
    pub use_quiescence: bool,
    /// In quiescence, skip captures of cheaper pieces by pricier ones.
    pub skip_losing_captures: bool,
    /// Reverse-futility margin per remaining ply, centipawns.
    pub rfp_margin: i32,
    /// Razoring margin per remaining ply, centipawns.
    pub razor_margin: i32,
    /// Initial half-width of the aspiration window, centipawns.
    pub aspiration_window: i32,
}

impl PruneParams {
    /// Plain alpha-beta: every speculative technique off. Search results
    /// equal exhaustive minimax to the same depth.
    #[must_use]
    pub fn minimal() -> Self {
        PruneParams {
            use_tt: false,
            use_null_move: false,
            use_lmr: false,
            use_aspiration: false,
            use_razoring: false,
            use_rfp: false,
            use_quiescence: false,
            skip_losing_captures: false,
            rfp_margin: 0,
            razor_margin: 0,
            aspiration_window: 0,
        }
    }
}

impl Default for PruneParams {
    fn default() -> Self {
        PruneParams {
            use_tt: true,
            use_null_move: true,
            use_lmr: true,
            use_aspiration: true,
            use_razoring: true,
            use_rfp: true,
            use_quiescence: true,
            skip_losing_captures: false,
            rfp_margin: 120,
            razor_margin: 300,
            aspiration_window: 50,
        }
    }
}
