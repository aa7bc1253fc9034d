use crate::array2d::Array2D;

// TODO: Add padding all around each plane
pub struct Plane {
  pixels: Array2D<u8>
}

impl Plane {
  pub fn new(width: usize, height: usize) -> Self {
    Self {
      pixels: Array2D::new_with(height, width, |_, _| 128u8)
    }
  }

  pub fn width(&self) -> usize {
    self.pixels.cols()
  }

  pub fn height(&self) -> usize {
    self.pixels.rows()
  }

  pub fn stride(&self) -> usize {
    self.pixels.cols()
  }

  pub fn pixels(&self) -> &Array2D<u8> {
    &self.pixels
  }

  pub fn pixels_mut(&mut self) -> &mut Array2D<u8> {
    &mut self.pixels
  }

  pub fn as_slice(&self) -> &[u8] {
    self.pixels.as_slice()
  }

  pub fn as_mut_slice(&mut self) -> &mut [u8] {
    self.pixels.as_mut_slice()
  }
}

pub struct Frame {
  planes: [Plane; 3]
}

impl Frame {
  pub fn new(y_width: usize, y_height: usize) -> Self {
    let uv_width = (y_width + 1)/2;
    let uv_height = (y_height + 1)/2;

    Self {
      planes: [
        Plane::new(y_width, y_height),
        Plane::new(uv_width, uv_height),
        Plane::new(uv_width, uv_height)
      ]
    }
  }

  pub fn plane(&self, idx: usize) -> &Plane {
    &self.planes[idx]
  }

  pub fn plane_mut(&mut self, idx: usize) -> &mut Plane {
    &mut self.planes[idx]
  }

  pub fn y(&self) -> &Plane {
    &self.planes[0]
  }

  pub fn y_mut(&mut self) -> &mut Plane {
    &mut self.planes[0]
  }

  pub fn u(&self) -> &Plane {
    &self.planes[1]
  }

  pub fn u_mut(&mut self) -> &mut Plane {
    &mut self.planes[1]
  }

  pub fn v(&self) -> &Plane {
    &self.planes[2]
  }

  pub fn v_mut(&mut self) -> &mut Plane {
    &mut self.planes[2]
  }
}
