//! Hardcoded scene descriptions.

use std::sync::Arc;

use anyhow::Result;
use ember_core::MeshBuffers;
use ember_math::Vec3;
use ember_render::{
    Axis, BvhNode, Camera, CheckerTexture, Color, ConstantMedium, Dielectric, DiffuseLight,
    Hittable, HittableList, ImageTexture, Lambertian, Material, Metal, NoiseTexture, Perlin, Quad,
    Rotate, Sphere, Translate, Triangle,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Scene {
    pub world: BvhNode,
    /// Light surfaces sampled directly by the integrator
    pub lights: Option<HittableList>,
    pub camera: Camera,
}

pub fn build(
    kind: crate::SceneKind,
    width: Option<u32>,
    samples: Option<u32>,
    depth: Option<u32>,
) -> Result<Scene> {
    let mut scene = match kind {
        crate::SceneKind::Cornell => cornell_box(),
        crate::SceneKind::Spheres => two_spheres(),
        crate::SceneKind::Demo => demo()?,
    };

    if let Some(width) = width {
        scene.camera = scene.camera.with_image_width(width);
    }
    if let Some(samples) = samples {
        scene.camera = scene.camera.with_samples_per_pixel(samples);
    }
    if let Some(depth) = depth {
        scene.camera = scene.camera.with_max_depth(depth);
    }

    Ok(scene)
}

/// The six faces of an axis-aligned box spanned by two opposite corners.
fn boxed(a: Vec3, b: Vec3, material: Arc<dyn Material>) -> HittableList {
    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let mut sides = HittableList::new();
    sides.add(Arc::new(Quad::new(
        Vec3::new(min.x, min.y, max.z),
        dx,
        dy,
        material.clone(),
    )));
    sides.add(Arc::new(Quad::new(
        Vec3::new(max.x, min.y, max.z),
        -dz,
        dy,
        material.clone(),
    )));
    sides.add(Arc::new(Quad::new(
        Vec3::new(max.x, min.y, min.z),
        -dx,
        dy,
        material.clone(),
    )));
    sides.add(Arc::new(Quad::new(
        Vec3::new(min.x, min.y, min.z),
        dz,
        dy,
        material.clone(),
    )));
    sides.add(Arc::new(Quad::new(
        Vec3::new(min.x, max.y, max.z),
        dx,
        -dz,
        material.clone(),
    )));
    sides.add(Arc::new(Quad::new(
        Vec3::new(min.x, min.y, min.z),
        dx,
        dz,
        material,
    )));
    sides
}

fn cornell_box() -> Scene {
    let red: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.73, 0.73, 0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Color::splat(15.0)));

    let mut world = HittableList::new();

    world.add(Arc::new(Quad::new(
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        green,
    )));
    world.add(Arc::new(Quad::new(
        Vec3::ZERO,
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        red,
    )));
    world.add(Arc::new(Quad::new(
        Vec3::ZERO,
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(555.0, 555.0, 555.0),
        Vec3::new(-555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        white.clone(),
    )));

    // Ceiling light, oriented to emit downward
    let light_quad = Arc::new(Quad::new(
        Vec3::new(343.0, 554.0, 332.0),
        Vec3::new(-130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -105.0),
        light,
    ));
    world.add(light_quad.clone());

    // Tall rotated box
    let tall = boxed(Vec3::ZERO, Vec3::new(165.0, 330.0, 165.0), white.clone());
    let tall: Arc<dyn Hittable> = Arc::new(Rotate::new(Arc::new(tall), Axis::Y, 15.0));
    world.add(Arc::new(Translate::new(tall, Vec3::new(265.0, 0.0, 295.0))));

    // Short box filled with smoke
    let short = boxed(Vec3::ZERO, Vec3::new(165.0, 165.0, 165.0), white);
    let short: Arc<dyn Hittable> = Arc::new(Rotate::new(Arc::new(short), Axis::Y, -18.0));
    let short: Arc<dyn Hittable> = Arc::new(Translate::new(short, Vec3::new(130.0, 0.0, 65.0)));
    world.add(Arc::new(ConstantMedium::from_color(
        short,
        0.01,
        Color::ZERO,
    )));

    // Mirror sphere
    world.add(Arc::new(Sphere::new(
        Vec3::new(190.0, 240.0, 145.0),
        50.0,
        Arc::new(Metal::new(Color::new(0.8, 0.85, 0.88), 0.0)),
    )));

    let mut lights = HittableList::new();
    lights.add(light_quad);

    let camera = Camera::new()
        .with_aspect_ratio(1.0)
        .with_image_width(600)
        .with_samples_per_pixel(64)
        .with_max_depth(50)
        .with_vfov(40.0)
        .with_view(
            Vec3::new(278.0, 278.0, -800.0),
            Vec3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_background(Color::ZERO);

    Scene {
        world: BvhNode::from_list(world),
        lights: Some(lights),
        camera,
    }
}

fn two_spheres() -> Scene {
    let gray: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::splat(0.5)));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        gray.clone(),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        gray,
    )));

    let camera = Camera::new()
        .with_aspect_ratio(16.0 / 9.0)
        .with_image_width(400)
        .with_samples_per_pixel(100)
        .with_max_depth(50)
        .with_background(Color::new(0.7, 0.8, 1.0));

    Scene {
        world: BvhNode::from_list(world),
        lights: None,
        camera,
    }
}

/// Checkered ground, noise and image textures, glass, fuzzy metal, a moving
/// sphere, a mesh-converted triangle pair and an overhead light.
fn demo() -> Result<Scene> {
    let mut world = HittableList::new();

    let checker = Arc::new(CheckerTexture::from_colors(
        0.5,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(checker)),
    )));

    let mut rng = StdRng::seed_from_u64(1);
    let noise = Arc::new(NoiseTexture::new(Perlin::new(&mut rng), 4.0));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(noise)),
    )));

    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));

    world.add(Arc::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.1)),
    )));

    world.add(Arc::new(Sphere::new_moving(
        Vec3::new(2.0, 0.4, 2.0),
        Vec3::new(2.0, 0.7, 2.0),
        0.4,
        Arc::new(Lambertian::from_color(Color::new(0.7, 0.3, 0.3))),
    )));

    // An image-backed sphere from a tiny in-memory gradient
    let mut gradient = Vec::with_capacity(8 * 8 * 3);
    for y in 0..8u32 {
        for x in 0..8u32 {
            gradient.push((x * 36) as u8);
            gradient.push((y * 36) as u8);
            gradient.push(128);
        }
    }
    let image = Arc::new(ember_core::Image::from_rgb8(8, 8, &gradient));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-2.0, 0.5, 2.5),
        0.5,
        Arc::new(Lambertian::new(Arc::new(ImageTexture::new(image)))),
    )));

    // A mesh-decoded triangle pair standing behind the spheres
    let positions = [
        0.0, -6.0, 0.0, //
        0.0, -6.0, 3.0, //
        0.0, -3.0, 3.0, //
        0.0, -3.0, 0.0,
    ];
    let normals = [
        0.0, 1.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 1.0, 0.0,
    ];
    let uvs = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
    let indices = [0u16, 1, 2, 0, 2, 3];
    let buffers = MeshBuffers {
        positions: &positions,
        normals: &normals,
        uvs: &uvs,
        indices: &indices,
    };
    let backdrop: Arc<dyn Material> =
        Arc::new(Lambertian::from_color(Color::new(0.4, 0.4, 0.7)));
    for [v0, v1, v2] in buffers.triangles()? {
        world.add(Arc::new(Triangle::new(v0, v1, v2, backdrop.clone())));
    }

    let light_quad = Arc::new(Quad::new(
        Vec3::new(-2.0, 6.0, -2.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
        Arc::new(DiffuseLight::from_color(Color::splat(5.0))),
    ));
    world.add(light_quad.clone());

    let mut lights = HittableList::new();
    lights.add(light_quad);

    let camera = Camera::new()
        .with_aspect_ratio(16.0 / 9.0)
        .with_image_width(400)
        .with_samples_per_pixel(100)
        .with_max_depth(50)
        .with_vfov(20.0)
        .with_view(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_defocus(0.6, 10.0)
        .with_background(Color::new(0.5, 0.6, 0.8));

    Ok(Scene {
        world: BvhNode::from_list(world),
        lights: Some(lights),
        camera,
    })
}
