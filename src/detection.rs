use crate::rect::{Centroid, Rect};

/*------------------------------------------------------------------------------
Detection struct
------------------------------------------------------------------------------*/

/// One detector output for a single frame: a box and an opaque class id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub rect: Rect,
    pub class_id: usize,
}

impl Detection {
    pub fn new(rect: Rect, class_id: usize) -> Self {
        Self { rect, class_id }
    }

    pub fn from_xyxy(x1: i32, y1: i32, x2: i32, y2: i32, class_id: usize) -> Self {
        Self::new(Rect::new(x1, y1, x2, y2), class_id)
    }

    pub fn get_rect(&self) -> Rect {
        self.rect
    }

    pub fn get_class_id(&self) -> usize {
        self.class_id
    }

    pub fn centroid(&self) -> Centroid {
        self.rect.centroid()
    }
}

impl From<(i32, i32, i32, i32, usize)> for Detection {
    fn from((x1, y1, x2, y2, class_id): (i32, i32, i32, i32, usize)) -> Self {
        Self::from_xyxy(x1, y1, x2, y2, class_id)
    }
}
