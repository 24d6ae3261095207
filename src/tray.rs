/// Tray Controller: minimize to the system tray and restore
///
/// The tray icon only exists while the main window is hidden. It carries a
/// context menu with a single "Restore" item. Whatever path triggers the
/// restore, the icon is torn down exactly once.
use anyhow::{anyhow, Result};
use image::{Rgba, RgbaImage};
use tray_icon::menu::{Menu, MenuId, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};
use tracing::{debug, info};

const ICON_SIZE: u32 = 64;

const BACKGROUND: Rgba<u8> = Rgba([0x80, 0x80, 0x80, 0xFF]);
const FACE: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);
const INK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xFF]);

/// Draw a clock face: white dial with black rim, hands at twelve and three
fn draw_clock_icon() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(ICON_SIZE, ICON_SIZE, BACKGROUND);
    let center = ICON_SIZE as f32 / 2.0;
    let radius = 24.0;

    for (x, y, px) in img.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist <= radius - 1.5 {
            *px = FACE;
        } else if dist <= radius {
            *px = INK;
        }
    }

    // hour hand, pointing up
    for y in 16..=32 {
        for x in 31..=32 {
            img.put_pixel(x, y, INK);
        }
    }
    // minute hand, pointing right
    for x in 32..=48 {
        for y in 31..=32 {
            img.put_pixel(x, y, INK);
        }
    }

    img
}

fn load_clock_icon() -> Result<Icon> {
    let img = draw_clock_icon();
    let (width, height) = img.dimensions();
    Icon::from_rgba(img.into_raw(), width, height)
        .map_err(|e| anyhow!("Failed to create icon from image: {:?}", e))
}

/// Something that can put an icon in the tray
pub trait TrayHost {
    /// Dropping the icon removes it from the tray
    type Icon;

    /// Show an icon and return it with the id of its "Restore" menu item
    fn show(&mut self) -> Result<(Self::Icon, MenuId)>;
}

/// The OS system tray
#[derive(Debug, Clone)]
pub struct SystemTray {
    tooltip: String,
}

impl SystemTray {
    pub fn new(tooltip: &str) -> Self {
        SystemTray {
            tooltip: tooltip.to_string(),
        }
    }
}

impl TrayHost for SystemTray {
    type Icon = TrayIcon;

    fn show(&mut self) -> Result<(TrayIcon, MenuId)> {
        let icon = load_clock_icon()?;

        let menu = Menu::new();
        let restore_item = MenuItem::new("Restore", true, None);
        menu.append(&restore_item)
            .map_err(|e| anyhow!("Failed to add restore item: {}", e))?;
        let restore_id = restore_item.id().clone();

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(&self.tooltip)
            .with_icon(icon)
            .with_menu(Box::new(menu))
            .build()
            .map_err(|e| anyhow!("Failed to create tray icon: {}", e))?;

        Ok((tray_icon, restore_id))
    }
}

struct ActiveTray<I> {
    _icon: I,
    restore_id: MenuId,
}

/// Owns the tray icon while the window is hidden
pub struct TrayController<H: TrayHost = SystemTray> {
    host: H,
    active: Option<ActiveTray<H::Icon>>,
}

impl<H: TrayHost> TrayController<H> {
    pub fn new(host: H) -> Self {
        TrayController { host, active: None }
    }

    pub fn is_minimized(&self) -> bool {
        self.active.is_some()
    }

    /// Put the icon in the tray. A second call while minimized is a no-op.
    pub fn minimize(&mut self) -> Result<()> {
        if self.active.is_some() {
            debug!("Tray icon already shown");
            return Ok(());
        }

        let (icon, restore_id) = self.host.show()?;
        self.active = Some(ActiveTray {
            _icon: icon,
            restore_id,
        });
        info!("Minimized to tray");
        Ok(())
    }

    /// Whether a menu event came from the active icon's "Restore" item
    pub fn is_restore_item(&self, id: &MenuId) -> bool {
        self.active
            .as_ref()
            .map_or(false, |tray| tray.restore_id == *id)
    }

    /// Remove the tray icon. Returns false if there was none.
    pub fn restore(&mut self) -> bool {
        match self.active.take() {
            Some(tray) => {
                drop(tray);
                info!("Restored from tray");
                true
            }
            None => {
                debug!("Restore requested with no tray icon");
                false
            }
        }
    }
}
