mod vec_stream;

pub use vec_stream::VecStream;
