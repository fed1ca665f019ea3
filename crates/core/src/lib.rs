pub mod pipeline {
    pub mod load_frame_use_case;
}

pub mod presentation {
    pub mod domain {
        pub mod projection;
    }
    pub mod infrastructure;
}

pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod video_metadata;
}

pub mod video {
    pub mod domain {
        pub mod frame_read_error;
        pub mod frame_reader;
        pub mod image_writer;
    }
    pub mod infrastructure {
        pub mod ffmpeg_frame_reader;
        pub mod image_file_writer;
    }
}
