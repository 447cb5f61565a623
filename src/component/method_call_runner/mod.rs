//! Method channel 呼叫檔執行元件

mod main;

pub use main::MethodCallRunner;
