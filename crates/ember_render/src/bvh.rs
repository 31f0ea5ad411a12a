//! Bounding volume hierarchy acceleration structure.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::Ray;
use ember_math::{Aabb, Interval};
use rand::RngCore;

/// Binary BVH node built by recursively splitting the object list along the
/// longest axis of its combined bounds.
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Arc<dyn Hittable>,
    bbox: Aabb,
}

impl BvhNode {
    pub fn from_list(list: HittableList) -> Self {
        let mut objects = list.into_objects();
        let len = objects.len();
        Self::build(&mut objects, 0, len)
    }

    fn build(objects: &mut [Arc<dyn Hittable>], start: usize, end: usize) -> Self {
        let mut bbox = Aabb::EMPTY;
        for object in &objects[start..end] {
            bbox = Aabb::surrounding(&bbox, &object.bounding_box());
        }
        let axis = bbox.largest_axis();

        let span = end - start;
        let (left, right): (Arc<dyn Hittable>, Arc<dyn Hittable>) = match span {
            // A single object sits in both slots so traversal never needs an
            // empty-child case
            1 => (objects[start].clone(), objects[start].clone()),
            2 => (objects[start].clone(), objects[start + 1].clone()),
            _ => {
                objects[start..end].sort_by(|a, b| Self::box_compare(a, b, axis));

                let mid = start + span / 2;
                (
                    Arc::new(Self::build(objects, start, mid)) as Arc<dyn Hittable>,
                    Arc::new(Self::build(objects, mid, end)) as Arc<dyn Hittable>,
                )
            }
        };

        Self { left, right, bbox }
    }

    fn box_compare(a: &Arc<dyn Hittable>, b: &Arc<dyn Hittable>, axis: usize) -> Ordering {
        let a_min = a.bounding_box().axis_interval(axis).min;
        let b_min = b.bounding_box().axis_interval(axis).min;
        a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        if !self.bbox.hit(ray, ray_t) {
            return false;
        }

        let hit_left = self.left.hit(ray, ray_t, rec, rng);
        // A left hit shrinks the interval so the right subtree only reports
        // strictly closer intersections
        let right_t = Interval::new(ray_t.min, if hit_left { rec.t } else { ray_t.max });
        let hit_right = self.right.hit(ray, right_t, rec, rng);

        hit_left || hit_right
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
