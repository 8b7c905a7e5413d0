//! Property-based tests for scheme resolution
//!
//! Uses proptest to check the laws every resolved scheme obeys, whatever
//! the seed, mode, contrast level or spec version.

use proptest::prelude::*;
use tone_dynamic::{DynamicScheme, Role, SchemeError, SpecVersion};
use tone_hct::Argb;
use tone_hct::contrast::ratio_of_tones;

// ============================================================================
// Strategy Generators
// ============================================================================

/// Opaque seed colors
fn seed_strategy() -> impl Strategy<Value = Argb> {
    (0u32..=0x00ff_ffff).prop_map(|rgb| Argb(0xff00_0000 | rgb))
}

fn version_strategy() -> impl Strategy<Value = SpecVersion> {
    prop_oneof![Just(SpecVersion::V2021), Just(SpecVersion::V2025)]
}

/// Any valid scheme
fn scheme_strategy() -> impl Strategy<Value = DynamicScheme> {
    (
        seed_strategy(),
        any::<bool>(),
        -1.0f64..=1.0,
        version_strategy(),
    )
        .prop_map(|(seed, dark, contrast, version)| {
            DynamicScheme::builder(seed)
                .dark(dark)
                .contrast_level(contrast)
                .spec_version(version)
                .build()
                .expect("contrast level is in range")
        })
}

/// Schemes at standard contrast or above
fn non_negative_contrast_strategy() -> impl Strategy<Value = DynamicScheme> {
    (seed_strategy(), any::<bool>(), 0.0f64..=1.0, version_strategy()).prop_map(
        |(seed, dark, contrast, version)| {
            DynamicScheme::builder(seed)
                .dark(dark)
                .contrast_level(contrast)
                .spec_version(version)
                .build()
                .expect("contrast level is in range")
        },
    )
}

fn is_extreme(tone: f64) -> bool {
    tone <= 0.0 || tone >= 100.0
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    // Each case resolves the whole catalog, so keep the count low.
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Every role resolves to a tone in [0, 100] with non-negative chroma
    #[test]
    fn tones_and_chroma_in_range(scheme in scheme_strategy()) {
        for color in scheme.resolve_all().unwrap() {
            prop_assert!((0.0..=100.0).contains(&color.tone), "{}: {}", color.name, color.tone);
            prop_assert!(color.hct.chroma() >= 0.0, "{}", color.name);
        }
    }

    /// Content roles reach their contrast target against their background,
    /// or go as far as the tone range allows
    #[test]
    fn contrast_targets_are_met(scheme in non_negative_contrast_strategy()) {
        let ctx = scheme.ctx();
        for role in scheme.roles() {
            let node = scheme.node(role).unwrap();
            if node.is_background()
                || node.tone_delta_pair().is_some()
                || node.second_background(&ctx).is_some()
            {
                continue;
            }
            let (Some(background), Some(curve)) = (node.background(&ctx), node.contrast_curve(&ctx))
            else {
                continue;
            };

            let tone = scheme.resolve(role).unwrap().tone;
            let bg_tone = scheme.resolve(background).unwrap().tone;
            let target = curve.value_at(scheme.contrast_level());
            let ratio = ratio_of_tones(tone, bg_tone);
            prop_assert!(
                ratio >= target - 0.05 || is_extreme(tone),
                "{role} on {background}: {ratio:.2} < {target:.2} (tones {tone:.1} / {bg_tone:.1})"
            );
        }
    }

    /// Every role in a tone delta pair sits at least the pair's delta away
    /// from its partner, unless one of them is pinned to the tone range's end
    #[test]
    fn pairs_keep_their_delta(scheme in scheme_strategy()) {
        let ctx = scheme.ctx();
        for role in scheme.roles() {
            let node = scheme.node(role).unwrap();
            let Some(pair) = node.tone_delta_pair() else {
                continue;
            };
            let partner = pair.partner_of(role);
            let tone = scheme.resolve(role).unwrap().tone;
            let partner_tone = ctx.tone_of(partner).unwrap();
            if is_extreme(tone) || is_extreme(partner_tone) {
                continue;
            }
            prop_assert!(
                (tone - partner_tone).abs() >= pair.delta - 1e-9,
                "{role} {tone:.2} / {partner} {partner_tone:.2}, delta {}",
                pair.delta
            );
        }
    }

    /// 2025 accents keep both their pair gap and their contrast target
    #[test]
    fn paired_accents_meet_contrast(
        seed in seed_strategy(),
        dark in any::<bool>(),
        contrast in 0.0f64..=1.0,
    ) {
        let scheme = DynamicScheme::builder(seed)
            .dark(dark)
            .contrast_level(contrast)
            .spec_version(SpecVersion::V2025)
            .build()
            .unwrap();
        let ctx = scheme.ctx();
        for role in [Role::Primary, Role::Secondary, Role::Tertiary, Role::Error] {
            let node = scheme.node(role).unwrap();
            let background = node.background(&ctx).unwrap();
            let curve = node.contrast_curve(&ctx).unwrap();

            let tone = scheme.resolve(role).unwrap().tone;
            let bg_tone = scheme.resolve(background).unwrap().tone;
            let target = curve.value_at(scheme.contrast_level());
            let ratio = ratio_of_tones(tone, bg_tone);
            prop_assert!(
                ratio >= target - 0.05 || is_extreme(tone),
                "{role} on {background}: {ratio:.2} < {target:.2} (tones {tone:.1} / {bg_tone:.1})"
            );
        }
    }

    /// Roles seeded from the most colorful tone of their palette come out
    /// colorful, not washed out at white
    #[test]
    fn most_colorful_roles_have_chroma(seed in seed_strategy()) {
        let scheme = DynamicScheme::builder(seed)
            .spec_version(SpecVersion::V2025)
            .build()
            .unwrap();
        for role in [Role::Primary, Role::TertiaryContainer, Role::InversePrimary] {
            let color = scheme.resolve(role).unwrap();
            prop_assert!(color.tone < 100.0, "{role}: tone {}", color.tone);
            prop_assert!(color.hct.chroma() > 5.0, "{role}: chroma {}", color.hct.chroma());
        }
    }

    /// Resolving the same role twice gives the same color
    #[test]
    fn resolution_is_idempotent(scheme in scheme_strategy()) {
        prop_assert_eq!(scheme.resolve_all().unwrap(), scheme.resolve_all().unwrap());
    }

    /// The two versions disagree on dark surfaces and on dim roles
    #[test]
    fn versions_diverge(seed in seed_strategy()) {
        let build = |version| {
            DynamicScheme::builder(seed)
                .dark(true)
                .spec_version(version)
                .build()
                .unwrap()
        };
        let old = build(SpecVersion::V2021);
        let new = build(SpecVersion::V2025);

        prop_assert!((old.resolve(Role::Surface).unwrap().tone - 6.0).abs() < 1e-9);
        prop_assert!((new.resolve(Role::Surface).unwrap().tone - 4.0).abs() < 1e-9);
        prop_assert_eq!(
            old.resolve(Role::PrimaryDim).unwrap_err(),
            SchemeError::RoleUnavailable { role: Role::PrimaryDim, version: SpecVersion::V2021 }
        );
        prop_assert!(new.resolve(Role::PrimaryDim).is_ok());
    }
}
