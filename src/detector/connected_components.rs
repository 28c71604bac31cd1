/// Connected components over a binary mask
/// Labels 8-connected foreground regions and accumulates per-region moments
use crate::models::Point;
use crate::utils::mask::Mask;
use std::collections::HashMap;

/// Union-Find data structure
pub struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
        }
    }

    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        // Path compression
        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }
        root
    }

    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x != root_y {
            self.parent[root_x as usize] = root_y;
        }
    }
}

/// Summary of one connected region
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Label stored in [`Labeling::label_at`] for this region's pixels
    pub label: u32,
    /// Pixel count
    pub area: usize,
    /// Inclusive bounding box: (min_x, min_y, max_x, max_y)
    pub bbox: (usize, usize, usize, usize),
    sum_x: f64,
    sum_y: f64,
}

impl Component {
    /// Centroid in continuous image coordinates
    pub fn centroid(&self) -> Point {
        let n = self.area.max(1) as f64;
        Point::new((self.sum_x / n + 0.5) as f32, (self.sum_y / n + 0.5) as f32)
    }

    /// Bounding box width
    pub fn width(&self) -> usize {
        self.bbox.2 - self.bbox.0 + 1
    }

    /// Bounding box height
    pub fn height(&self) -> usize {
        self.bbox.3 - self.bbox.1 + 1
    }
}

/// Label image plus its regions
pub struct Labeling {
    width: usize,
    height: usize,
    labels: Vec<u32>,
    /// Regions, ordered by first pixel in row-major order
    pub components: Vec<Component>,
}

impl Labeling {
    /// Label image width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Label image height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Label at (x, y); 0 is background
    pub fn label_at(&self, x: usize, y: usize) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.labels[y * self.width + x]
    }
}

/// Label the 8-connected foreground regions of `mask`
pub fn label_components(mask: &Mask) -> Labeling {
    let width = mask.width();
    let height = mask.height();

    let mut labels = vec![0u32; width * height];
    let mut next_label = 1u32;
    let mut uf = UnionFind::new(width * height + 1);

    // First pass: provisional labels
    for y in 0..height {
        for x in 0..width {
            if !mask.get(x, y) {
                continue;
            }

            let mut neighbor_labels = [0u32; 4];
            let mut n = 0;
            let mut push = |l: u32| {
                if l != 0 {
                    neighbor_labels[n] = l;
                    n += 1;
                }
            };

            if x > 0 {
                push(labels[y * width + x - 1]);
            }
            if y > 0 {
                push(labels[(y - 1) * width + x]);
                if x > 0 {
                    push(labels[(y - 1) * width + x - 1]);
                }
                if x + 1 < width {
                    push(labels[(y - 1) * width + x + 1]);
                }
            }

            let idx = y * width + x;
            match neighbor_labels[..n].iter().min() {
                None => {
                    labels[idx] = next_label;
                    next_label += 1;
                }
                Some(&min_label) => {
                    labels[idx] = min_label;
                    for &l in &neighbor_labels[..n] {
                        if l != min_label {
                            uf.union(min_label, l);
                        }
                    }
                }
            }
        }
    }

    // Second pass: resolve roots, renumber densely, accumulate moments
    let mut dense: HashMap<u32, u32> = HashMap::new();
    let mut components: Vec<Component> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if labels[idx] == 0 {
                continue;
            }
            let root = uf.find(labels[idx]);
            let label = *dense.entry(root).or_insert_with(|| {
                components.push(Component {
                    label: components.len() as u32 + 1,
                    area: 0,
                    bbox: (x, y, x, y),
                    sum_x: 0.0,
                    sum_y: 0.0,
                });
                components.len() as u32
            });
            labels[idx] = label;

            let c = &mut components[label as usize - 1];
            c.area += 1;
            c.sum_x += x as f64;
            c.sum_y += y as f64;
            c.bbox.0 = c.bbox.0.min(x);
            c.bbox.1 = c.bbox.1.min(y);
            c.bbox.2 = c.bbox.2.max(x);
            c.bbox.3 = c.bbox.3.max(y);
        }
    }

    Labeling {
        width,
        height,
        labels,
        components,
    }
}
