
pub use instance_conditional_test::{Branch, InstanceConditionalTest};
pub use numeric_attribute_binary_test::NumericAttributeBinaryTest;
