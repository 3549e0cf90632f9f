use std::mem;
use crate::renderer::wgpu_context::WgpuContext;
use wgpu::Buffer;
use wgpu::wgt::PollType;

/// A device buffer paired with the CPU-side copy of its contents.
#[derive(Debug)]
pub struct GpuBuffer<T> {
    data: Vec<T>,
    buffer: wgpu::Buffer,
}

impl<T: bytemuck::Pod> GpuBuffer<T>{
    pub fn new(wgpu_context: &WgpuContext, label: &str, data: Vec<T>, usage: wgpu::BufferUsages) -> Self {
        let usage = usage | wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::COPY_SRC;
        let buffer = wgpu_context.get_device().create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (data.len() * size_of::<T>()).max(wgpu::COPY_BUFFER_ALIGNMENT as usize) as u64,
            usage,
            mapped_at_creation: false,
        });
        wgpu_context.get_queue().write_buffer(
            &buffer,
            0,
            bytemuck::cast_slice(&data)
        );

        Self { data, buffer }
    }

    /// Opens an exclusive write window over the first `len` elements of the buffer and
    /// hands its bytes to `write`. The window is released when this returns, so the
    /// device never reads the range while it is being written.
    ///
    /// Returns `false` when nothing was written, either because `len` is zero or
    /// because the queue refused the window.
    pub fn write_exclusive<F>(&self, wgpu_context: &WgpuContext, len: usize, write: F) -> bool
    where
        F: FnOnce(&mut [u8]),
    {
        let byte_len = (len.min(self.data.len()) * size_of::<T>()) as u64;
        let Some(size) = wgpu::BufferSize::new(byte_len) else {
            return false;
        };

        match wgpu_context.get_queue().write_buffer_with(&self.buffer, 0, size) {
            Some(mut view) => {
                write(&mut view);
                true
            }
            None => {
                log::warn!("Unable to open a write window of {} bytes", byte_len);
                false
            }
        }
    }

    /// Downloads data from the GPU buffer to the CPU-side `Vec`.
    /// This method will overwrite the contents of `self.data`.
    ///
    /// # Returns
    ///
    /// `Ok(&Vec<T>)` if the readback was successful.
    /// `Err(wgpu::BufferAsyncError)` if the buffer mapping fails.
    pub fn download(&mut self, wgpu_context: &WgpuContext) -> Result<&Vec<T>, wgpu::BufferAsyncError> {
        let device = wgpu_context.get_device();
        let queue = wgpu_context.get_queue();

        let size = (self.data.len() * mem::size_of::<T>()) as u64;
        if size == 0 {
            return Ok(&self.data);
        }

        // The CPU can only map buffers created with MAP_READ, so copy into a staging buffer first.
        let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Staging Buffer (Download)"),
            size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Download Encoder"),
        });
        encoder.copy_buffer_to_buffer(
            &self.buffer,
            0,
            &staging_buffer,
            0,
            size,
        );
        queue.submit(Some(encoder.finish()));

        let buffer_slice = staging_buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        // Block until the copy and the mapping are done.
        if let Err(e) = device.poll(PollType::Wait) {
            log::error!("Device poll failed while downloading a buffer: {:?}", e);
        }

        receiver.recv().unwrap_or(Err(wgpu::BufferAsyncError))?;

        let mapped_range = buffer_slice.get_mapped_range();
        let downloaded_data: &[T] = bytemuck::cast_slice(&mapped_range);
        self.data.clear();
        self.data.extend_from_slice(downloaded_data);
        drop(mapped_range);
        staging_buffer.unmap();

        Ok(&self.data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &Vec<T>{
        &self.data
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

}
