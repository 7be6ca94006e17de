#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

// -- sanitized collection of windows imports

pub use winapi::ctypes::c_void;
pub use winapi::Interface;

pub use winapi::shared::dxgi::*;
pub use winapi::shared::dxgi1_2::*;
pub use winapi::shared::dxgi1_3::*;
pub use winapi::shared::dxgi1_4::*;
pub use winapi::shared::dxgi1_5::*;
pub use winapi::shared::dxgi1_6::*;
pub use winapi::shared::dxgiformat::*;
pub use winapi::shared::dxgitype::*;
pub use winapi::shared::minwindef::*;
pub use winapi::shared::windef::*;
pub use winapi::shared::winerror;

pub use winapi::um::d3d12::*;
pub use winapi::um::d3d12sdklayers::*;
pub use winapi::um::d3dcommon::*;
pub use winapi::um::errhandlingapi::GetLastError;
pub use winapi::um::handleapi::CloseHandle;
pub use winapi::um::libloaderapi::GetModuleHandleW;
pub use winapi::um::synchapi::{CreateEventW, WaitForSingleObject};
pub use winapi::um::unknwnbase::IUnknown;
pub use winapi::um::winbase::INFINITE;
pub use winapi::um::winnt::HANDLE;
pub use winapi::um::winuser::*;

pub use wio::com::ComPtr;

// -- not exposed by winapi's d3dcommon
pub const D3D_FEATURE_LEVEL_12_2: D3D_FEATURE_LEVEL = 0xc200;
