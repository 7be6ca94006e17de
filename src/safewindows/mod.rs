// -- the minimum of Win32 needed to host a swap chain: a window class, one window, a
// -- non-blocking message pump and the event handle the fence waits on.

use std::{cmp, mem, ptr};

use anyhow::anyhow;

use crate::win::*;

fn lasterror(what: &str) -> anyhow::Error {
    let errcode = unsafe { GetLastError() };
    anyhow!("{} (GetLastError {})", what, errcode)
}

fn wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}

pub struct SWinAPI {
    hinstance: HINSTANCE,
}

pub fn initwinapi() -> anyhow::Result<SWinAPI> {
    let hinstance = unsafe { GetModuleHandleW(ptr::null()) };
    if hinstance.is_null() {
        return Err(lasterror("Could not get module handle"));
    }

    Ok(SWinAPI { hinstance })
}

impl SWinAPI {
    pub fn registerclassex(&self, windowclassname: &str) -> anyhow::Result<SWindowClass> {
        let classname = wide(windowclassname);

        let classdata = WNDCLASSEXW {
            cbSize: mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(windowproc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: self.hinstance,
            hIcon: ptr::null_mut(),
            hCursor: unsafe { LoadCursorW(ptr::null_mut(), IDC_ARROW) },
            hbrBackground: (COLOR_WINDOW + 1) as usize as HBRUSH,
            lpszMenuName: ptr::null(),
            lpszClassName: classname.as_ptr(),
            hIconSm: ptr::null_mut(),
        };

        let atom = unsafe { RegisterClassExW(&classdata) };
        if atom == 0 {
            return Err(lasterror("Could not register window class"));
        }

        Ok(SWindowClass {
            winapi: self,
            windowclassname: classname,
        })
    }
}

pub struct SWindowClass<'windows> {
    winapi: &'windows SWinAPI,
    windowclassname: Vec<u16>,
}

impl<'windows> Drop for SWindowClass<'windows> {
    fn drop(&mut self) {
        unsafe {
            UnregisterClassW(self.windowclassname.as_ptr(), self.winapi.hinstance);
        }
    }
}

impl<'windows> SWindowClass<'windows> {
    // -- width and height are the client area, the outer window is grown to fit the frame
    pub fn createwindow(&self, title: &str, width: u32, height: u32) -> anyhow::Result<SWindow> {
        let windowstyle: DWORD = WS_OVERLAPPEDWINDOW;

        let mut windowrect = RECT {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        };
        unsafe { AdjustWindowRect(&mut windowrect, windowstyle, FALSE) };

        let windowwidth = windowrect.right - windowrect.left;
        let windowheight = windowrect.bottom - windowrect.top;

        let screenwidth = unsafe { GetSystemMetrics(SM_CXSCREEN) };
        let screenheight = unsafe { GetSystemMetrics(SM_CYSCREEN) };
        let windowx = cmp::max(0, (screenwidth - windowwidth) / 2);
        let windowy = cmp::max(0, (screenheight - windowheight) / 2);

        let titleparam = wide(title);

        let hwnd: HWND = unsafe {
            CreateWindowExW(
                0,
                self.windowclassname.as_ptr(),
                titleparam.as_ptr(),
                windowstyle,
                windowx,
                windowy,
                windowwidth,
                windowheight,
                ptr::null_mut(),
                ptr::null_mut(),
                self.winapi.hinstance,
                ptr::null_mut(),
            )
        };

        if hwnd.is_null() {
            return Err(lasterror("Could not create window"));
        }

        Ok(SWindow {
            window: hwnd,
            width,
            height,
        })
    }
}

unsafe extern "system" fn windowproc(
    hwnd: HWND,
    msg: UINT,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_DESTROY => {
            PostQuitMessage(0);
            0
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

pub struct SWindow {
    window: HWND,
    width: u32,
    height: u32,
}

impl SWindow {
    pub unsafe fn raw(&self) -> HWND {
        self.window
    }

    pub fn show(&self) {
        unsafe { ShowWindow(self.window, SW_SHOW) };
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EPumpResult {
    Continue,
    Quit,
}

// -- drains every pending message for the thread without blocking
pub fn pumpmessages() -> EPumpResult {
    let mut msg: MSG = unsafe { mem::zeroed() };

    loop {
        let found = unsafe { PeekMessageW(&mut msg, ptr::null_mut(), 0, 0, PM_REMOVE) };
        if found == 0 {
            return EPumpResult::Continue;
        }

        if msg.message == WM_QUIT {
            return EPumpResult::Quit;
        }

        unsafe {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

pub struct SEventHandle {
    event: HANDLE,
}

impl SEventHandle {
    // -- auto reset, starts unsignalled
    pub fn new() -> anyhow::Result<Self> {
        let event = unsafe { CreateEventW(ptr::null_mut(), FALSE, FALSE, ptr::null()) };
        if event.is_null() {
            return Err(lasterror("Couldn't create event"));
        }

        Ok(Self { event })
    }

    pub unsafe fn raw(&self) -> HANDLE {
        self.event
    }

    pub fn waitforsingleobject(&self, duration: u32) {
        unsafe { WaitForSingleObject(self.event, duration) };
    }
}

impl Drop for SEventHandle {
    fn drop(&mut self) {
        unsafe { CloseHandle(self.event) };
    }
}
