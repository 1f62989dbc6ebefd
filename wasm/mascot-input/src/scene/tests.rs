use glam::{Vec2, Vec3};

use super::*;

fn camera_at_origin() -> Camera {
    Camera {
        position: Vec3::ZERO,
        ..Camera::default()
    }
}

fn forward_ray() -> Ray {
    Ray::new(Vec3::ZERO, Vec3::NEG_Z)
}

fn unit_box(name: &str, z: f32) -> SceneNode {
    SceneNode::named(name)
        .with_geometry(Geometry::Box { size: Vec3::ONE })
        .with_position(Vec3::new(0.0, 0.0, z))
}

mod readiness {
    use super::*;

    #[test]
    fn empty_scene_is_not_ready() {
        assert!(!SceneGraph::default().is_ready());
    }

    #[test]
    fn collision_volume_alone_is_not_ready() {
        let mut scene = SceneGraph::default();
        scene.add_node(unit_box("hit-volume", -5.0));
        assert!(!scene.is_ready());
    }

    #[test]
    fn model_makes_scene_ready() {
        let mut scene = SceneGraph::default();
        scene.add_model(SceneNode::named("model"));
        assert!(scene.is_ready());
    }
}

mod primitives {
    use super::*;

    #[test]
    fn box_hit_reports_front_face() {
        let mut scene = SceneGraph::new(camera_at_origin());
        scene.add_node(unit_box("box", -5.0));

        let hits = scene.intersect(&forward_ray());
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 4.5).abs() < 1e-4);
        assert_eq!(hits[0].node, "box");
    }

    #[test]
    fn box_behind_ray_is_missed() {
        let mut scene = SceneGraph::default();
        scene.add_node(unit_box("box", 5.0));
        assert!(scene.intersect(&forward_ray()).is_empty());
    }

    #[test]
    fn ray_from_inside_box_hits_exit_face() {
        let mut scene = SceneGraph::default();
        scene.add_node(unit_box("box", 0.0));
        let hits = scene.intersect(&forward_ray());
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 0.5).abs() < 1e-4);
    }

    #[test]
    fn sphere_hit_and_miss() {
        let mut scene = SceneGraph::default();
        scene.add_node(
            SceneNode::named("sphere")
                .with_geometry(Geometry::Sphere { radius: 2.0 })
                .with_position(Vec3::new(0.0, 0.0, -10.0)),
        );

        let hits = scene.intersect(&forward_ray());
        assert!((hits[0].distance - 8.0).abs() < 1e-4);

        let sideways = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(scene.intersect(&sideways).is_empty());
    }

    #[test]
    fn mesh_triangle_hit_from_either_side() {
        let triangle = MeshGeometry::new(
            vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            Vec::new(),
        );
        let mut scene = SceneGraph::default();
        scene.add_node(
            SceneNode::named("tri")
                .with_geometry(Geometry::Mesh(triangle))
                .with_position(Vec3::new(0.0, 0.0, -3.0)),
        );

        assert_eq!(scene.intersect(&forward_ray()).len(), 1);

        let from_behind = Ray::new(Vec3::new(0.0, 0.0, -6.0), Vec3::Z);
        assert_eq!(scene.intersect(&from_behind).len(), 1);

        let beside = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(scene.intersect(&beside).is_empty());
    }

    #[test]
    fn indexed_mesh_uses_indices() {
        let quad = MeshGeometry::new(
            vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        );
        let mut scene = SceneGraph::default();
        scene.add_node(
            SceneNode::named("quad")
                .with_geometry(Geometry::Mesh(quad))
                .with_position(Vec3::new(0.0, 0.0, -2.0)),
        );

        let upper_left = Ray::new(Vec3::new(-0.8, 0.8, 0.0), Vec3::NEG_Z);
        assert_eq!(scene.intersect(&upper_left).len(), 1);
    }

    #[test]
    fn out_of_range_indices_are_skipped() {
        let broken = MeshGeometry::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 7]);
        let mut scene = SceneGraph::default();
        scene.add_node(SceneNode::named("broken").with_geometry(Geometry::Mesh(broken)));
        assert!(scene.intersect(&forward_ray()).is_empty());
    }
}

mod hierarchy {
    use super::*;

    #[test]
    fn children_inherit_parent_transform() {
        let child = SceneNode::named("child")
            .with_geometry(Geometry::Box { size: Vec3::ONE })
            .with_position(Vec3::new(0.0, 0.0, -2.0));
        let parent = SceneNode::named("parent")
            .with_position(Vec3::new(0.0, 0.0, -3.0))
            .with_child(child);

        let mut scene = SceneGraph::default();
        scene.add_model(parent);

        let hits = scene.intersect(&forward_ray());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, "child");
        assert!((hits[0].distance - 4.5).abs() < 1e-4);
    }

    #[test]
    fn scaled_node_reports_world_distance() {
        let mut scene = SceneGraph::default();
        scene.add_node(unit_box("big", -10.0).with_scale(Vec3::splat(4.0)));

        let hits = scene.intersect(&forward_ray());
        assert!((hits[0].distance - 8.0).abs() < 1e-3);
    }

    #[test]
    fn hits_are_sorted_nearest_first() {
        let mut scene = SceneGraph::default();
        scene.add_node(unit_box("far", -20.0));
        scene.add_node(unit_box("near", -5.0));

        let names: Vec<_> = scene
            .intersect(&forward_ray())
            .into_iter()
            .map(|hit| hit.node)
            .collect();
        assert_eq!(names, ["near", "far"]);
    }

    #[test]
    fn degenerate_scale_is_ignored() {
        let mut scene = SceneGraph::default();
        scene.add_node(unit_box("flat", -5.0).with_scale(Vec3::ZERO));
        assert!(scene.intersect(&forward_ray()).is_empty());
    }
}

mod camera_rays {
    use super::*;

    #[test]
    fn center_of_view_hits_box_in_front_of_camera() {
        let mut scene = SceneGraph::new(Camera::looking_at(
            Vec3::new(0.0, 17.0, 10.0),
            Vec3::new(0.0, 10.0, 0.0),
        ));
        scene.add_node(unit_box("volume", 0.0).with_position(Vec3::new(0.0, 10.0, 0.0)));

        let camera = *scene.camera();
        assert_eq!(scene.intersect(&camera.ray_through(Vec2::ZERO)).len(), 1);
        assert!(scene.intersect(&camera.ray_through(Vec2::new(0.95, 0.95))).is_empty());
    }
}

mod wire {
    use super::*;

    #[test]
    fn node_deserializes_with_defaults() {
        let node: SceneNode = serde_json::from_value(serde_json::json!({
            "name": "hit-volume",
            "position": [0.0, 10.0, 0.0],
            "geometry": { "kind": "box", "size": [4.0, 10.0, 4.0] },
        }))
        .unwrap();

        assert_eq!(node.scale, Vec3::ONE);
        assert_eq!(node.rotation, Quat::IDENTITY);
        assert_eq!(
            node.geometry,
            Some(Geometry::Box {
                size: Vec3::new(4.0, 10.0, 4.0)
            })
        );
        assert!(node.children.is_empty());
    }

    #[test]
    fn mesh_deserializes_without_indices() {
        let geometry: Geometry = serde_json::from_value(serde_json::json!({
            "kind": "mesh",
            "positions": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        }))
        .unwrap();

        let Geometry::Mesh(mesh) = geometry else {
            panic!("expected mesh");
        };
        assert_eq!(mesh.positions.len(), 3);
        assert!(mesh.indices.is_empty());
    }
}
