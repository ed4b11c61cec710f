pub mod manual_histogram_scripts;
