//! # modfx: Modulated-Delay Effects Engine
//!
//! `modfx` is a real-time stereo chorus engine built on a modulated delay line.
//! A short, sinusoidally swept delay is mixed with the dry signal; feedback
//! thickens the result and a phase offset between the channels' LFOs widens
//! the stereo image. The same signal path also runs as a flanger or a vibrato
//! by swapping clamp ranges and defaults.
//!
//! ## Architecture
//!
//! - **Parameters** - clamped controls with derived linear gains and sample counts
//! - **Delay line** - fixed-capacity ring buffer with a linearly interpolated read
//! - **Oscillator** - stereo phase-accumulator sine LFO
//! - **Engine** - the per-sample signal path and block runner
//! - **Presets** - validated named parameter bundles and an instance factory
//! - **Remote** - lock-free parameter snapshots from a control thread
//!
//! Every fallible check happens at configuration time or before a block
//! starts. The per-sample path does not allocate, lock or return errors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modfx::prelude::*;
//!
//! // Build an instance from a named preset at 48kHz
//! let table = PresetTable::new().unwrap();
//! let mut chorus = table.create("classic", 48_000).unwrap();
//!
//! // Tweak a control; out-of-range values are clamped, never rejected
//! chorus.set_rate(2.5);
//!
//! // Process audio
//! let input = vec![0.0; 512];
//! let mut out_left = vec![0.0; 512];
//! let mut out_right = vec![0.0; 512];
//! chorus
//!     .process_block(&input, &input, &mut out_left, &mut out_right)
//!     .unwrap();
//! ```

pub mod analysis;
pub mod block;
pub mod delay_line;
pub mod engine;
pub mod error;
pub mod introspection;
pub mod oscillator;
pub mod params;
pub mod presets;
pub mod remote;

/// Prelude module for convenient imports
pub mod prelude {
    // Parameters
    pub use crate::params::{
        db_to_gain, ms_to_samples, EffectKind, ParamId, ParamLimits, ParamRange, ParameterSet,
        ParameterValues, MAX_FEEDBACK, MAX_GAIN_DB, MAX_SAMPLE_RATE_HZ, MIN_GAIN_DB,
        MIN_SAMPLE_RATE_HZ,
    };

    // DSP building blocks
    pub use crate::delay_line::{DelayLine, GUARD};
    pub use crate::oscillator::Oscillator;

    // Processing
    pub use crate::block::{StereoBlock, DEFAULT_BLOCK_SIZE};
    pub use crate::engine::EffectInstance;
    pub use crate::error::EngineError;

    // Presets
    pub use crate::presets::{create_from_preset, Preset, PresetTable};

    // Cross-thread control
    pub use crate::remote::{
        parameter_channel, ParameterReceiver, ParameterSender, DEFAULT_QUEUE_CAPACITY,
    };

    // Introspection and analysis
    pub use crate::analysis::AudioAnalysis;
    pub use crate::introspection::{param_infos, ParamCurve, ParamInfo, ValueFormat};
}

// Re-export key types at crate root for convenience
pub use prelude::*;
