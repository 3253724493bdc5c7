//! The built-in solar system: a star, eight planets, the earth's moon, a
//! point light at the star and a camera.
//!
//! Every orbiting body is a holder node (distance and orbital phase) with one
//! geometry child (scale and color).

use crate::scene::description::{BodyDescription, BodyKind, SceneDescription, TransformDescription};

/// `(holder, geometry, distance, orbital phase, color)`
const PLANETS: [(&str, &str, f32, f32, [f32; 3]); 8] = [
    ("earth_hold", "earth_geo", 13.0, 1.0, [0.2, 0.4, 1.0]),
    ("mercury_hold", "mercury_geo", 5.0, 0.7, [0.6, 0.6, 0.6]),
    ("venus_hold", "venus_geo", 9.0, 2.0, [0.9, 0.7, 0.4]),
    ("mars_hold", "mars_geo", 16.0, 2.9, [0.8, 0.3, 0.1]),
    ("jup_hold", "jup_geo", 19.0, 3.6, [0.8, 0.6, 0.4]),
    ("sat_hold", "sat_geo", 22.0, 4.9, [0.9, 0.8, 0.5]),
    ("ur_hold", "ur_geo", 25.0, 5.7, [0.5, 0.8, 0.9]),
    ("nep_hold", "nep_geo", 28.0, 6.0, [0.2, 0.3, 0.9]),
];

#[must_use]
pub fn solar_system() -> SceneDescription {
    let mut bodies = vec![
        BodyDescription::new("sun_hold", None, BodyKind::Holder),
        BodyDescription::new("sun_geo", Some("sun_hold"), BodyKind::Geometry)
            .with_transform(scaled(3.5))
            .with_color([1.0, 0.85, 0.2]),
        BodyDescription::new("sun_light", Some("sun_hold"), BodyKind::Light)
            .with_color([1.0, 1.0, 1.0])
            .with_intensity(1.0),
    ];

    for (holder, geometry, distance, phase, color) in PLANETS {
        bodies.push(
            BodyDescription::new(holder, None, BodyKind::Holder)
                .with_transform(orbit(distance, phase)),
        );
        bodies.push(BodyDescription::new(geometry, Some(holder), BodyKind::Geometry).with_color(color));

        if holder == "earth_hold" {
            bodies.push(
                BodyDescription::new("earthmoon_hold", Some("earth_hold"), BodyKind::Holder)
                    .with_transform(orbit(2.0, 0.0)),
            );
            bodies.push(
                BodyDescription::new("earthmoon_geo", Some("earthmoon_hold"), BodyKind::Geometry)
                    .with_transform(scaled(0.4))
                    .with_color([0.7, 0.7, 0.7]),
            );
        }
    }

    bodies.push(
        BodyDescription::new("camera", None, BodyKind::Camera).with_transform(TransformDescription {
            translation: [0.0, 0.0, 4.0],
            ..Default::default()
        }),
    );

    SceneDescription {
        name: "Scene".to_string(),
        bodies,
    }
}

fn orbit(distance: f32, phase: f32) -> TransformDescription {
    TransformDescription {
        translation: [distance, 0.0, 0.0],
        rotation_y: phase,
        scale: 1.0,
    }
}

fn scaled(scale: f32) -> TransformDescription {
    TransformDescription {
        scale,
        ..Default::default()
    }
}
