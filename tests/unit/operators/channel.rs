//! Tests for alpha/color propagation and normalization

#[cfg(test)]
mod tests {
    use layerforge::math::random::NoiseSource;
    use layerforge::operators::{Transform, UnaryOperator};
    use layerforge::{GeneratorError, Layer};

    fn pixel_layer(pixels: &[&[f64]]) -> Layer {
        let channels = pixels.first().map_or(1, |pixel| pixel.len());
        let mut layer = Layer::new(pixels.len(), 1, channels).expect("Failed to create layer");
        for (x, pixel) in pixels.iter().enumerate() {
            for (channel, value) in pixel.iter().enumerate() {
                *layer.at_mut(x, 0, channel) = *value;
            }
        }
        layer
    }

    fn weights(values: &[f64]) -> Layer {
        pixel_layer(&values.iter().map(std::slice::from_ref).collect::<Vec<_>>())
    }

    fn assert_pixel(layer: &Layer, x: usize, expected: &[f64]) {
        for (channel, value) in expected.iter().enumerate() {
            let actual = layer.at(x, 0, channel);
            assert!(
                (actual - value).abs() < 1e-12,
                "({x}, {channel}): expected {value}, got {actual}"
            );
        }
    }

    // Tests alpha is copied through the transform into the color channels
    // Verified by overwriting channel 0 as well
    #[test]
    fn test_alpha_to_color() {
        let mut layer = pixel_layer(&[&[1.0, 0.0, 0.0, 0.0], &[0.5, 9.0, 9.0, 9.0]]);

        UnaryOperator::AlphaToColor(Transform::new(vec![1.0, 1.0, 2.0, 4.0], 1.0, 0.25))
            .apply(&mut layer, &mut NoiseSource::new(1))
            .expect("AlphaToColor should succeed");

        assert_pixel(&layer, 0, &[1.0, 1.25, 2.25, 4.25]);
        assert_pixel(&layer, 1, &[0.5, 0.75, 1.25, 2.25]);
    }

    // Tests the mask weight scales the source alpha
    // Verified by blending the result instead
    #[test]
    fn test_alpha_to_color_masked() {
        let mut layer = pixel_layer(&[&[1.0, 7.0], &[1.0, 7.0]]);
        let mask = weights(&[0.5, 0.0]);

        UnaryOperator::AlphaToColor(Transform::uniform(1.0, 2))
            .apply_masked(&mut layer, &mask, &mut NoiseSource::new(1))
            .expect("Masked AlphaToColor should succeed");

        assert_pixel(&layer, 0, &[1.0, 0.5]);
        assert_pixel(&layer, 1, &[1.0, 0.0]);
    }

    // Tests color propagation needs a color channel
    // Verified by writing into a single-channel layer
    #[test]
    fn test_channel_operators_need_two_channels() {
        let mut layer = pixel_layer(&[&[0.3]]);
        let before = layer.clone();
        let mut rng = NoiseSource::new(1);

        for operator in [
            UnaryOperator::AlphaToColor(Transform::uniform(1.0, 4)),
            UnaryOperator::ColorToAlpha(Transform::uniform(1.0, 4)),
            UnaryOperator::Normalize,
        ] {
            let result = operator.apply(&mut layer, &mut rng);
            assert!(matches!(
                result,
                Err(GeneratorError::InsufficientChannels {
                    required: 2,
                    found: 1,
                    ..
                })
            ));
        }
        assert_eq!(layer, before);
    }

    // Tests the color mid-range replaces every color channel
    // Verified by averaging all channels including alpha
    #[test]
    fn test_color_to_alpha() {
        let mut layer = pixel_layer(&[&[7.0, 1.0, 3.0, 2.0]]);

        UnaryOperator::ColorToAlpha(Transform::uniform(1.0, 4))
            .apply(&mut layer, &mut NoiseSource::new(1))
            .expect("ColorToAlpha should succeed");

        assert_pixel(&layer, 0, &[7.0, 2.0, 2.0, 2.0]);
    }

    // Tests the mask weight scales the mid-range before the transform
    // Verified by applying the offset before weighting
    #[test]
    fn test_color_to_alpha_masked() {
        let mut layer = pixel_layer(&[&[7.0, 1.0, 3.0, 2.0], &[7.0, 1.0, 3.0, 2.0]]);
        let mask = weights(&[0.5, 0.0]);

        UnaryOperator::ColorToAlpha(Transform::uniform(1.0, 4).with_offset(1.0))
            .apply_masked(&mut layer, &mask, &mut NoiseSource::new(1))
            .expect("Masked ColorToAlpha should succeed");

        assert_pixel(&layer, 0, &[7.0, 2.0, 2.0, 2.0]);
        assert_pixel(&layer, 1, &[7.0, 1.0, 1.0, 1.0]);
    }

    // Tests normalization maps the global color range onto [0, 1]
    // Verified by normalizing each pixel separately
    #[test]
    fn test_normalize() {
        let mut layer = pixel_layer(&[&[9.0, 2.0, 4.0], &[-3.0, 6.0, 10.0]]);

        UnaryOperator::Normalize
            .apply(&mut layer, &mut NoiseSource::new(1))
            .expect("Normalize should succeed");

        assert_pixel(&layer, 0, &[9.0, 0.0, 0.25]);
        assert_pixel(&layer, 1, &[-3.0, 0.5, 1.0]);
    }

    // Tests masked normalization blends toward the rescaled value
    // Verified by gating on the mask
    #[test]
    fn test_normalize_masked() {
        let mut layer = pixel_layer(&[&[0.0, 2.0], &[0.0, 6.0]]);
        let mask = weights(&[0.5, 0.0]);

        UnaryOperator::Normalize
            .apply_masked(&mut layer, &mask, &mut NoiseSource::new(1))
            .expect("Masked Normalize should succeed");

        assert_pixel(&layer, 0, &[0.0, 1.0]);
        assert_pixel(&layer, 1, &[0.0, 6.0]);
    }

    // Tests a flat color range is reported and nothing is written
    // Verified by dividing by the zero range
    #[test]
    fn test_normalize_flat_range() {
        let mut layer = pixel_layer(&[&[1.0, 3.0, 3.0], &[5.0, 3.0, 3.0]]);
        let before = layer.clone();

        let result = UnaryOperator::Normalize.apply(&mut layer, &mut NoiseSource::new(1));

        assert!(matches!(result, Err(GeneratorError::FlatRange { .. })));
        assert_eq!(layer, before);
    }
}
