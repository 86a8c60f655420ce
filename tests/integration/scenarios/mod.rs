pub mod signal_catcher_tests;
