//! Tests for masking policies and their assignment to operators

#[cfg(test)]
mod tests {
    use layerforge::Layer;
    use layerforge::operators::{
        BinaryOperator, FbmParams, GradientParams, MaskPolicy, Masking, Threshold, Transform,
        UnaryOperator,
    };

    // Tests each policy's combination of original and computed values
    // Verified by blending for every policy
    #[test]
    fn test_policy_combine() {
        assert!((MaskPolicy::Blend.combine(2.0, 6.0, Some(0.25)) - 3.0).abs() < 1e-12);
        assert!((MaskPolicy::Blend.combine(2.0, 6.0, Some(1.5)) - 8.0).abs() < 1e-12);
        assert!((MaskPolicy::Scale.combine(2.0, 6.0, Some(0.25)) - 6.0).abs() < 1e-12);
        assert!((MaskPolicy::Gate.combine(2.0, 6.0, Some(0.25)) - 6.0).abs() < 1e-12);
        assert!((MaskPolicy::Gate.combine(2.0, 6.0, Some(0.0)) - 2.0).abs() < 1e-12);
        assert!((MaskPolicy::Gate.combine(2.0, 6.0, Some(-1.0)) - 2.0).abs() < 1e-12);

        for policy in [MaskPolicy::Scale, MaskPolicy::Blend, MaskPolicy::Gate] {
            assert!((policy.combine(2.0, 6.0, None) - 6.0).abs() < 1e-12);
        }
    }

    // Tests only gating masks exclude pixels outright
    // Verified by gating on negative weights only
    #[test]
    fn test_policy_admits() {
        assert!(MaskPolicy::Gate.admits(0.01));
        assert!(!MaskPolicy::Gate.admits(0.0));
        assert!(!MaskPolicy::Gate.admits(-0.5));
        assert!(MaskPolicy::Blend.admits(-0.5));
        assert!(MaskPolicy::Scale.admits(0.0));
    }

    // Tests masking reads channel 0 of the mask without clamping
    // Verified by clamping weights into [0, 1]
    #[test]
    fn test_masking_weight() {
        let mut mask = Layer::new(2, 1, 2).expect("Failed to create mask");
        *mask.at_mut(0, 0, 0) = 2.5;
        *mask.at_mut(0, 0, 1) = 0.75;
        *mask.at_mut(1, 0, 0) = -1.0;

        let masked = Masking::new(Some(&mask), MaskPolicy::Gate);
        assert_eq!(masked.weight(0, 0), Some(2.5));
        assert_eq!(masked.weight(1, 0), Some(-1.0));
        assert!(!masked.skips(masked.weight(0, 0)));
        assert!(masked.skips(masked.weight(1, 0)));

        let unmasked = Masking::new(None, MaskPolicy::Gate);
        assert_eq!(unmasked.weight(0, 0), None);
        assert!(!unmasked.skips(None));
    }

    // Tests every operator kind carries its documented policy
    // Verified by giving Noise the Scale policy
    #[test]
    fn test_operator_policies() {
        let transform = Transform::uniform(1.0, 4);
        let threshold = Threshold::new(vec![0.0; 4], true);

        let expected = [
            (UnaryOperator::Fill(transform.clone()), MaskPolicy::Scale),
            (UnaryOperator::AlphaToColor(transform.clone()), MaskPolicy::Scale),
            (UnaryOperator::ColorToAlpha(transform.clone()), MaskPolicy::Scale),
            (UnaryOperator::Noise(transform.clone()), MaskPolicy::Blend),
            (UnaryOperator::Fbm(FbmParams::default()), MaskPolicy::Blend),
            (UnaryOperator::LessThan(threshold.clone()), MaskPolicy::Blend),
            (UnaryOperator::Normalize, MaskPolicy::Blend),
            (UnaryOperator::Gradient(GradientParams::default()), MaskPolicy::Gate),
            (UnaryOperator::GreaterThan(threshold), MaskPolicy::Gate),
        ];
        for (operator, policy) in expected {
            assert_eq!(operator.mask_policy(), policy, "{}", operator.name());
        }

        assert_eq!(
            BinaryOperator::AlphaBlend(transform.clone()).mask_policy(),
            MaskPolicy::Blend
        );
        assert_eq!(
            BinaryOperator::Multiply(transform).mask_policy(),
            MaskPolicy::Blend
        );
        assert_eq!(BinaryOperator::Swap.mask_policy(), MaskPolicy::Gate);
    }

    // Tests operator names match the configuration vocabulary
    // Verified by returning the Rust variant name for FBM
    #[test]
    fn test_operator_names() {
        assert_eq!(UnaryOperator::Fbm(FbmParams::default()).name(), "FBM");
        assert_eq!(UnaryOperator::Normalize.name(), "Normalize");
        assert_eq!(
            UnaryOperator::GreaterThan(Threshold::default()).name(),
            "GreaterThan"
        );
        assert_eq!(BinaryOperator::Swap.name(), "Swap");
        assert_eq!(
            BinaryOperator::AlphaBlend(Transform::default()).name(),
            "AlphaBlend"
        );
    }
}
