use std::fmt;
use crate::backend::{Backend, Unsqueezable};

// A simple mock tensor implementation for testing
#[derive(Clone, Debug)]
pub struct MockTensor {
    pub(crate) shape: Vec<usize>,
    pub(crate) value: i32,
    pub(crate) device: usize,
}

impl MockTensor {
    pub fn new(shape: Vec<usize>, value: i32) -> Self {
        Self { shape, value, device: 0 }
    }
}

impl fmt::Display for MockTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MockTensor({:?}, {}, dev{})", self.shape, self.value, self.device)
    }
}

impl Backend for MockTensor {
    type Device = usize;

    fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn cat(tensors: &[Self], dim: usize) -> Self {
        // Simple concatenation logic for testing
        let mut new_shape = tensors[0].shape.clone();
        new_shape[dim] = tensors.iter().map(|t| t.shape[dim]).sum();

        // Use the value and device from the first tensor
        MockTensor {
            shape: new_shape,
            value: tensors[0].value,
            device: tensors[0].device,
        }
    }

    fn vectorize_dim(&self, dim: usize) -> Vec<Self> {
        let mut new_shape = self.shape.clone();

        // The sliced dimension disappears from each element
        new_shape.remove(dim);

        (0..self.shape[dim])
            .map(|_| MockTensor {
                shape: new_shape.clone(),
                value: self.value,
                device: self.device,
            })
            .collect()
    }

    fn slice(&self, dimension: usize, _start_idx: usize, len: usize) -> Self {
        let mut new_shape = self.shape.clone();
        new_shape[dimension] = len;
        MockTensor {
            shape: new_shape,
            value: self.value,
            device: self.device,
        }
    }

    fn device(&self) -> Self::Device {
        self.device
    }

    fn to_device(&self, device: &Self::Device) -> Self {
        MockTensor {
            shape: self.shape.clone(),
            value: self.value,
            device: *device,
        }
    }
}

// Implement Unsqueezable for MockTensor
impl Unsqueezable for MockTensor {
    type Unsqueezed = MockTensor;

    fn unsqueeze(&self, dim: usize) -> Self::Unsqueezed {
        let mut new_shape = self.shape.clone();
        new_shape.insert(dim, 1);
        MockTensor {
            shape: new_shape,
            value: self.value,
            device: self.device,
        }
    }
}
