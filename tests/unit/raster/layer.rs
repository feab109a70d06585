//! Tests for the dense layer buffer

#[cfg(test)]
mod tests {
    use layerforge::io::configuration::{MAX_LAYER_DIMENSION, MAX_LAYER_ELEMENTS};
    use layerforge::{GeneratorError, Layer};

    // Tests a new layer is zeroed and reports its shape
    // Verified by swapping width and height in the backing array
    #[test]
    fn test_layer_shape() {
        let layer = Layer::new(5, 3, 2).expect("Failed to create layer");

        assert_eq!(layer.width(), 5);
        assert_eq!(layer.height(), 3);
        assert_eq!(layer.channels(), 2);
        assert_eq!(layer.dimensions(), (5, 3));
        assert_eq!(layer.values().count(), 30);
        assert!(layer.values().all(|value| value.abs() < f64::EPSILON));
    }

    // Tests zero and oversized dimensions are rejected
    // Verified by allocating before validation
    #[test]
    fn test_layer_dimension_validation() {
        for (width, height, channels, parameter) in [
            (0, 4, 4, "width"),
            (4, 0, 4, "height"),
            (4, 4, 0, "channels"),
            (MAX_LAYER_DIMENSION + 1, 1, 1, "width"),
        ] {
            let result = Layer::new(width, height, channels);
            match result {
                Err(GeneratorError::InvalidParameter { parameter: name, .. }) => {
                    assert_eq!(name, parameter);
                }
                other => panic!("Expected InvalidParameter for {parameter}, got {other:?}"),
            }
        }
    }

    // Tests the total element count is capped even when every axis is in range
    // Verified by validating each axis alone
    #[test]
    fn test_layer_element_count_validation() {
        let side = MAX_LAYER_DIMENSION;
        assert!(side * side * side > MAX_LAYER_ELEMENTS);

        let result = Layer::new(side, side, side);

        assert!(matches!(
            result,
            Err(GeneratorError::InvalidParameter {
                parameter: "dimensions",
                ..
            })
        ));
    }

    // Tests storage order places a pixel's channels next to each other
    // Verified by storing channel planes contiguously
    #[test]
    fn test_layer_storage_order() {
        let (width, height, channels) = (3, 2, 2);
        let mut layer = Layer::new(width, height, channels).expect("Failed to create layer");
        for y in 0..height {
            for x in 0..width {
                for channel in 0..channels {
                    *layer.at_mut(x, y, channel) = ((x + y * width) * channels + channel) as f64;
                }
            }
        }

        let values: Vec<f64> = layer.values().collect();
        let expected: Vec<f64> = (0..width * height * channels).map(|i| i as f64).collect();
        assert_eq!(values, expected);
    }

    // Tests checked access and the mask weight outside the layer
    // Verified by wrapping out-of-range coordinates
    #[test]
    fn test_layer_checked_access() {
        let mut layer = Layer::new(2, 2, 1).expect("Failed to create layer");
        *layer.get_mut(1, 1, 0).expect("Element should exist") = -2.5;

        assert_eq!(layer.get(1, 1, 0), Some(-2.5));
        assert_eq!(layer.get(2, 1, 0), None);
        assert_eq!(layer.get(1, 1, 1), None);
        assert!(layer.get_mut(0, 2, 0).is_none());
        assert!(layer.contains(1, 1, 0));
        assert!(!layer.contains(1, 1, 1));
        assert!((layer.weight(1, 1) + 2.5).abs() < f64::EPSILON);
        assert!(layer.weight(5, 5).abs() < f64::EPSILON);
    }

    // Tests channel planes are indexed [y, x] and detached from the layer
    // Verified by returning a view that tracks later writes
    #[test]
    fn test_layer_channel_plane() {
        let mut layer = Layer::new(3, 2, 2).expect("Failed to create layer");
        *layer.at_mut(2, 1, 1) = 4.0;

        let plane = layer.channel_plane(1).expect("Channel should exist");
        assert_eq!(plane.dim(), (2, 3));
        assert_eq!(plane.get([1, 2]).copied(), Some(4.0));

        *layer.at_mut(2, 1, 1) = 8.0;
        assert_eq!(plane.get([1, 2]).copied(), Some(4.0));
        assert!(layer.channel_plane(2).is_none());
    }
}
