//! Trace hooks for observing intermediate cipher state.
//!
//! The traced cipher variants report a checkpoint after every transform and
//! at every round-key consumption. Labels follow the FIPS-197 trace
//! vocabulary: `input`, `k_sch`, `start`, `s_box`, `s_row`, `m_col`, and
//! `output` for encryption; the decryption direction prefixes labels with
//! `i` and adds `ik_add` for the state between the round-key addition and
//! InvMixColumns. The round argument is the index of the round key in play.

/// Observer invoked with the round number, a checkpoint label, and a
/// snapshot of the state or round key at that point.
///
/// Implementations must not influence the computation; the cipher never
/// reads anything back from the sink.
pub trait TraceSink {
    /// Records one checkpoint.
    fn record(&mut self, round: usize, label: &str, bytes: &[u8]);
}

/// Sink that discards every checkpoint.
///
/// The untraced cipher paths monomorphize against this type, so they carry
/// no tracing overhead.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    #[inline]
    fn record(&mut self, _round: usize, _label: &str, _bytes: &[u8]) {}
}
