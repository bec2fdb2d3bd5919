use std::fmt::{Debug, Display};


/// The rank-raising extension that must be fulfilled by any backend whose
/// tensors can be stacked into a batch
pub trait Unsqueezable: Backend {
    /// the type we unsqueeze to
    type Unsqueezed: Backend<Device = Self::Device>;

    /// Unsqueeze the tensor along dimension `dim` with size 1
    fn unsqueeze(&self, dim: usize) -> Self::Unsqueezed;
}

/// The backend trait that must be fulfilled by any backend to support batched
/// feature extraction
pub trait Backend: Debug + Display + Clone + Send + Sync + 'static {
    /// The accelerator device type this backend's tensors live on
    type Device: Clone + Debug + Send + Sync + 'static;

    /// Return the shape of this tensor
    fn shape(&self) -> Vec<usize>;

    /// Concatenate several tensors to each other along dimension `dim`, in the order supplied
    fn cat(tensors: &[Self], dim: usize) -> Self;

    /// Slice a tensor into one tensor per index of the supplied `dim`, dropping that dimension
    fn vectorize_dim(&self, dim: usize) -> Vec<Self>;

    /// Slice a given `dimension` from `start_idx` to `start_idx + len`
    fn slice(&self, dimension: usize, start_idx: usize, len: usize) -> Self;

    /// Return the device this tensor currently lives on
    fn device(&self) -> Self::Device;

    /// Return a copy of this tensor resident on the given `device`
    fn to_device(&self, device: &Self::Device) -> Self;
}
