//! Geometric field candidate detection.

use image::GrayImage;
use tracing::debug;

use crate::models::config::DetectorConfig;
use crate::models::field::{FieldRegion, Rect};

use super::classify::classify_geometry;

/// Detects rectangular field candidates from edge contours.
///
/// A pure function of the frame: grayscale gradient edges, connected
/// components, bounding rectangles, then a size and aspect filter that
/// rejects noise speckles and full-page containers while retaining shapes
/// resembling input boxes.
pub struct RegionDetector {
    config: DetectorConfig,
}

impl RegionDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Detect candidate regions in a grayscale frame.
    ///
    /// A frame with no qualifying contours yields an empty list, not an
    /// error.
    pub fn detect(&self, gray: &GrayImage) -> Vec<FieldRegion> {
        let width = gray.width() as usize;
        let height = gray.height() as usize;

        let edges = self.edge_map(gray);
        let components = self.find_components(&edges, width, height);
        debug!("found {} edge components", components.len());

        let mut regions = Vec::new();
        for component in &components {
            let Some(rect) = bounding_rect(component) else {
                continue;
            };
            if !self.accepts(&rect) {
                continue;
            }
            let kind = classify_geometry(rect.width, rect.height);
            regions.push(FieldRegion::new(rect, kind, self.config.base_confidence));
        }

        debug!("kept {} candidate regions", regions.len());
        regions
    }

    /// Binary edge map from Sobel gradient magnitude. Border pixels stay
    /// non-edge.
    fn edge_map(&self, gray: &GrayImage) -> Vec<Vec<bool>> {
        let width = gray.width() as usize;
        let height = gray.height() as usize;
        let mut edges = vec![vec![false; width]; height];

        if width < 3 || height < 3 {
            return edges;
        }

        let px = |x: usize, y: usize| gray.get_pixel(x as u32, y as u32)[0] as i32;

        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let gx = -px(x - 1, y - 1) - 2 * px(x - 1, y) - px(x - 1, y + 1)
                    + px(x + 1, y - 1)
                    + 2 * px(x + 1, y)
                    + px(x + 1, y + 1);
                let gy = -px(x - 1, y - 1) - 2 * px(x, y - 1) - px(x + 1, y - 1)
                    + px(x - 1, y + 1)
                    + 2 * px(x, y + 1)
                    + px(x + 1, y + 1);

                let magnitude = ((gx * gx + gy * gy) as f32).sqrt();
                edges[y][x] = magnitude > self.config.edge_threshold;
            }
        }

        edges
    }

    fn find_components(
        &self,
        edges: &[Vec<bool>],
        width: usize,
        height: usize,
    ) -> Vec<Vec<(usize, usize)>> {
        let mut visited = vec![vec![false; width]; height];
        let mut components = Vec::new();

        for y in 0..height {
            for x in 0..width {
                if edges[y][x] && !visited[y][x] {
                    let component = flood_fill(edges, &mut visited, x, y, width, height);
                    if component.len() >= self.config.min_component_pixels {
                        components.push(component);
                    }
                }
            }
        }

        components
    }

    fn accepts(&self, rect: &Rect) -> bool {
        let c = &self.config;
        if rect.width <= c.min_width || rect.width >= c.max_width {
            return false;
        }
        if rect.height <= c.min_height || rect.height >= c.max_height {
            return false;
        }
        if rect.area() <= c.min_area {
            return false;
        }
        let aspect = rect.aspect_ratio();
        aspect > c.min_aspect && aspect < c.max_aspect
    }
}

fn flood_fill(
    edges: &[Vec<bool>],
    visited: &mut [Vec<bool>],
    start_x: usize,
    start_y: usize,
    width: usize,
    height: usize,
) -> Vec<(usize, usize)> {
    let mut component = Vec::new();
    let mut stack = vec![(start_x, start_y)];

    while let Some((x, y)) = stack.pop() {
        if x >= width || y >= height || visited[y][x] || !edges[y][x] {
            continue;
        }

        visited[y][x] = true;
        component.push((x, y));

        // 4-connected neighbors
        if x > 0 {
            stack.push((x - 1, y));
        }
        if x + 1 < width {
            stack.push((x + 1, y));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
        if y + 1 < height {
            stack.push((x, y + 1));
        }
    }

    component
}

fn bounding_rect(component: &[(usize, usize)]) -> Option<Rect> {
    let mut min_x = usize::MAX;
    let mut max_x = 0;
    let mut min_y = usize::MAX;
    let mut max_y = 0;

    for &(x, y) in component {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_x > max_x {
        return None;
    }

    Some(Rect::new(
        min_x as u32,
        min_y as u32,
        (max_x - min_x + 1) as u32,
        (max_y - min_y + 1) as u32,
    ))
}
