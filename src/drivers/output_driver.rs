use crate::ui::UiFrame;
use std::io;

pub trait OutputDriver {
    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;

    /// Drawing surface size in cells.
    fn size(&self) -> io::Result<(u16, u16)>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>);
}
