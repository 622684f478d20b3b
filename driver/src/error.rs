use kernel::KernelError;

/// Lifts a driver-specific failure into the kernel error model.
pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}
