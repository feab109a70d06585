//! Tests for pipeline construction, overrides and failure isolation

#[cfg(test)]
mod tests {
    use layerforge::GeneratorError;
    use layerforge::io::pipeline::{Overrides, Pipeline, Step};
    use layerforge::operators::{Transform, UnaryOperator};

    const MAP: &str = r#"{ "map": { "width": 4, "height": 2, "seed": 11,
        "layers": [ { "name": "base" }, { "name": "mask", "channels": 1, "width": 4 } ],
        "operators": [
            { "type": "FillOperator", "layer": "base", "multiplier": { "a": 1, "r": 0, "g": 0, "b": 0 } },
            { "type": "AlphaToColorOperator", "layer": "base" }
        ] } }"#;

    // Tests map values and per-layer defaults are resolved
    // Verified by ignoring per-layer channel counts
    #[test]
    fn test_pipeline_from_document() {
        let pipeline =
            Pipeline::from_json_str(MAP, &Overrides::default()).expect("Pipeline should build");

        assert_eq!((pipeline.width, pipeline.height, pipeline.seed), (4, 2, 11));
        assert_eq!(pipeline.layers.len(), 2);
        assert_eq!(pipeline.layers[0].channels, 4);
        assert_eq!(pipeline.layers[1].channels, 1);
        assert_eq!(pipeline.layers[1].height, 2);
        assert_eq!(pipeline.steps.len(), 2);
        assert_eq!(pipeline.steps[1].operator_name(), "AlphaToColor");
    }

    // Tests command-line overrides replace document values
    // Verified by letting the document win
    #[test]
    fn test_overrides() {
        let overrides = Overrides {
            seed: Some(99),
            width: Some(8),
            height: None,
        };
        let pipeline = Pipeline::from_json_str(MAP, &overrides).expect("Pipeline should build");

        assert_eq!(pipeline.seed, 99);
        assert_eq!(pipeline.width, 8);
        assert_eq!(pipeline.height, 2);
        assert_eq!(pipeline.layers[0].width, 8);
        assert_eq!(pipeline.layers[1].width, 4);
    }

    // Tests documents must declare exactly one base layer
    // Verified by accepting any first layer as the base
    #[test]
    fn test_base_layer_required() {
        let missing = Pipeline::from_json_str(
            r#"{ "map": { "layers": [ { "name": "clouds" } ] } }"#,
            &Overrides::default(),
        );
        assert!(matches!(missing, Err(GeneratorError::MissingBaseLayer)));

        let repeated = Pipeline::from_json_str(
            r#"{ "map": { "layers": [ { "name": "base" }, { "name": "base" } ] } }"#,
            &Overrides::default(),
        );
        assert!(matches!(
            repeated,
            Err(GeneratorError::InvalidParameter { parameter: "layers", .. })
        ));
    }

    // Tests zero sizes are rejected when the pipeline is built
    // Verified by deferring the check to layer creation
    #[test]
    fn test_zero_dimensions_rejected() {
        let zero_width = Pipeline::from_json_str(
            r#"{ "map": { "width": 0, "layers": [ { "name": "base" } ] } }"#,
            &Overrides::default(),
        );
        assert!(matches!(
            zero_width,
            Err(GeneratorError::InvalidParameter { parameter: "width", .. })
        ));

        let zero_channels = Pipeline::from_json_str(
            r#"{ "map": { "width": 2, "height": 2, "layers": [ { "name": "base", "channels": 0 } ] } }"#,
            &Overrides::default(),
        );
        assert!(matches!(
            zero_channels,
            Err(GeneratorError::InvalidParameter { parameter: "channels", .. })
        ));
    }

    // Tests unknown and incomplete operator entries are skipped
    // Verified by aborting on the first unknown type
    #[test]
    fn test_invalid_entries_skipped() {
        let pipeline = Pipeline::from_json_str(
            r#"{ "map": { "width": 2, "height": 2, "layers": [ { "name": "base" } ],
                 "operators": [ { "type": "BlurOperator", "layer": "base" },
                                { "type": "FillOperator" },
                                { "type": "NormalizeOperator", "layer": "base" } ] } }"#,
            &Overrides::default(),
        )
        .expect("Pipeline should build");

        assert_eq!(pipeline.steps.len(), 1);
        assert_eq!(pipeline.steps[0].operator_name(), "Normalize");
    }

    // Tests a run applies every step and reports success
    // Verified by skipping the second step
    #[test]
    fn test_run_applies_steps_in_order() {
        let pipeline =
            Pipeline::from_json_str(MAP, &Overrides::default()).expect("Pipeline should build");
        let mut visited = Vec::new();
        let (generator, report) = pipeline
            .run_with_progress(|index, step| visited.push((index, step.operator_name())))
            .expect("Run should succeed");

        assert!(report.is_clean());
        assert_eq!(report.applied, 2);
        assert_eq!(visited, vec![(0, "Fill"), (1, "AlphaToColor")]);
        for channel in 0..4 {
            let value = generator
                .sample("base", 3, 1, channel)
                .expect("Sample should exist");
            assert!((value - 1.0).abs() < f64::EPSILON);
        }
    }

    // Tests a failing step is recorded while later steps still run
    // Verified by stopping the run on the first failure
    #[test]
    fn test_failures_do_not_stop_run() {
        let pipeline = Pipeline::from_json_str(
            r#"{ "map": { "width": 2, "height": 2, "layers": [ { "name": "base" } ],
                 "operators": [ { "type": "FillOperator", "layer": "missing" },
                                { "type": "NormalizeOperator", "layer": "base" },
                                { "type": "FillOperator", "layer": "base", "scale": 0.5 } ] } }"#,
            &Overrides::default(),
        )
        .expect("Pipeline should build");

        let (generator, report) = pipeline.run().expect("Run should succeed");

        assert_eq!(report.applied, 1);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].index, 0);
        assert!(matches!(report.failures[0].error, GeneratorError::LayerNotFound { .. }));
        assert!(matches!(report.failures[1].error, GeneratorError::FlatRange { .. }));
        let value = generator.sample("base", 0, 0, 2).expect("Sample should exist");
        assert!((value - 0.5).abs() < f64::EPSILON);
    }

    // Tests step descriptions name operator, targets and mask
    // Verified by omitting the mask from the description
    #[test]
    fn test_step_display() {
        let step = Step::Unary {
            layer: "base".to_string(),
            mask: Some("stencil".to_string()),
            operator: UnaryOperator::Fill(Transform::uniform(1.0, 4)),
        };

        assert_eq!(step.to_string(), "Fill on 'base' masked by 'stencil'");
    }
}
