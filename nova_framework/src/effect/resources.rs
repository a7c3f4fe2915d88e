//! Embedded stock effect bytecode
//!
//! The framework ships precompiled bytecode for its stock effects. The
//! blobs are embedded in the binary and handed out as static slices;
//! effect loading consumes them the same way as user-supplied bytecode.
//!
//! All stock effects currently resolve to the sprite effect blob.

static SPRITE_EFFECT: &[u8] = include_bytes!("../../resources/sprite_effect.nfxb");

/// Bytecode for the alpha-test effect
pub fn alpha_test_effect() -> &'static [u8] {
    SPRITE_EFFECT
}

/// Bytecode for the basic effect
pub fn basic_effect() -> &'static [u8] {
    SPRITE_EFFECT
}

/// Bytecode for the dual-texture effect
pub fn dual_texture_effect() -> &'static [u8] {
    SPRITE_EFFECT
}

/// Bytecode for the environment-map effect
pub fn environment_map_effect() -> &'static [u8] {
    SPRITE_EFFECT
}

/// Bytecode for the skinned effect
pub fn skinned_effect() -> &'static [u8] {
    SPRITE_EFFECT
}

/// Bytecode for the sprite effect
pub fn sprite_effect() -> &'static [u8] {
    SPRITE_EFFECT
}

// ============================================================================
// Tests
// ============================================================================
