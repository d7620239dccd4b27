mod work_dto;

pub use work_dto::{
    CreateWorkFields, CreateWorkFormDto, PreviewImage, UpdateWorkDto, WorkResponseDto,
    WorkStatusDto, MAX_PREVIEW_IMAGE_SIZE,
};
