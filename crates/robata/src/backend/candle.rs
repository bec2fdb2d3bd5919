use super::{Backend, Unsqueezable};
use candle_core::Tensor;

impl Backend for Tensor {
    type Device = candle_core::Device;

    fn shape(&self) -> Vec<usize> {
        self.dims().to_vec()
    }

    fn cat(tensors: &[Self], dim: usize) -> Self {
        Tensor::cat(
            tensors, dim
        ).unwrap()
    }

    fn vectorize_dim(&self, dim: usize) -> Vec<Self> {
        let dims = self.dims();

        // Ensure tensor has at least one dimension
        if dims.is_empty() {
            panic!("Empty dimension tensor")
        }

        let dim_size = dims[dim];
        let mut result = Vec::with_capacity(dim_size);

        // Extract each slice along the requested dimension
        for i in 0..dim_size {
            let slice = self.narrow(dim, i, 1).unwrap();
            // Remove the dimension which now has size 1
            let slice = slice.squeeze(dim).unwrap();
            result.push(slice);
        }

        result
    }

    fn slice(&self, dimension: usize, start_idx: usize, len: usize) -> Self {
        self.narrow(dimension, start_idx, len).unwrap()
    }

    fn device(&self) -> Self::Device {
        self.device().clone()
    }

    fn to_device(&self, device: &Self::Device) -> Self {
        self.to_device(device).unwrap()
    }
}

impl Unsqueezable for Tensor {
    type Unsqueezed = Tensor;

    fn unsqueeze(&self, dim: usize) -> Self::Unsqueezed {
        self.unsqueeze(dim).unwrap()
    }
}
