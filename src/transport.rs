/// Trait for the byte link between the host and the ESP32 AT firmware.
/// Implement this trait for different transports (serial port, mocks, etc.)
pub trait AtTransport: Send + Sized + 'static {
    /// Error type for transport operations
    type Error: std::fmt::Debug;

    /// Write data to the transport
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Number of bytes that can be read without blocking
    fn bytes_available(&mut self) -> Result<usize, Self::Error>;

    /// Read data from the transport with a timeout in milliseconds.
    ///
    /// `Ok(0)` means the timeout expired with nothing received. Any `Err`
    /// is treated as the link being gone.
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error>;

    /// Open a second handle to the same connection, used by the line reader thread
    fn try_clone(&self) -> Result<Self, Self::Error>;
}
